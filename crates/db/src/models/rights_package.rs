//! Rights package models.

use courtside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rights_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RightsPackage {
    pub id: DbId,
    pub broadcaster_id: DbId,
    pub name: String,
    pub scope_type: String,
    pub sport_id: Option<DbId>,
    pub league_id: Option<DbId>,
    pub season: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub is_exclusive_default: bool,
    pub territories_default: Vec<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a rights package. New packages start as `draft`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRightsPackage {
    pub broadcaster_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub scope_type: String,
    pub sport_id: Option<DbId>,
    pub league_id: Option<DbId>,
    pub season: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    #[serde(default)]
    pub is_exclusive_default: bool,
    #[serde(default)]
    pub territories_default: Vec<String>,
}

/// DTO for patching a rights package. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRightsPackage {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub season: Option<String>,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
    pub is_exclusive_default: Option<bool>,
    pub territories_default: Option<Vec<String>>,
}

/// Request body for the status transition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageStatusRequest {
    pub status: String,
}

/// A candidate row for suggestion ranking: an active package of an
/// active broadcaster whose window contains the event date.
#[derive(Debug, Clone, FromRow)]
pub struct SuggestionCandidateRow {
    pub package_id: DbId,
    pub package_name: String,
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub scope_type: String,
    pub sport_id: Option<DbId>,
    pub league_id: Option<DbId>,
}

impl From<SuggestionCandidateRow> for courtside_core::suggestion::PackageCandidate {
    fn from(row: SuggestionCandidateRow) -> Self {
        Self {
            package_id: row.package_id,
            package_name: row.package_name,
            broadcaster_id: row.broadcaster_id,
            broadcaster_name: row.broadcaster_name,
            scope_type: row.scope_type,
            sport_id: row.sport_id,
            league_id: row.league_id,
        }
    }
}
