//! Rights grant models.

use courtside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rights_events` table: one broadcaster's grant for one
/// event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RightsEvent {
    pub id: DbId,
    pub event_id: DbId,
    pub broadcaster_id: DbId,
    pub package_id: Option<DbId>,
    pub rights_live: bool,
    pub rights_replay: bool,
    pub rights_highlights: bool,
    pub replay_window_hours: Option<i32>,
    pub territories_allowed: Vec<String>,
    pub territories_blocked: Vec<String>,
    pub exclusivity: String,
    pub platform: String,
    pub status: String,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a grant. New grants start as `draft`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRightsEvent {
    pub event_id: DbId,
    pub broadcaster_id: DbId,
    pub package_id: Option<DbId>,
    #[serde(default)]
    pub rights_live: bool,
    #[serde(default)]
    pub rights_replay: bool,
    #[serde(default)]
    pub rights_highlights: bool,
    pub replay_window_hours: Option<i32>,
    #[serde(default)]
    pub territories_allowed: Vec<String>,
    #[serde(default)]
    pub territories_blocked: Vec<String>,
    pub exclusivity: String,
    pub platform: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// DTO for patching a grant. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRightsEvent {
    pub rights_live: Option<bool>,
    pub rights_replay: Option<bool>,
    pub rights_highlights: Option<bool>,
    pub replay_window_hours: Option<i32>,
    pub territories_allowed: Option<Vec<String>>,
    pub territories_blocked: Option<Vec<String>>,
    pub exclusivity: Option<String>,
    pub platform: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// Request body for the status transition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantStatusRequest {
    pub status: String,
}

/// An active exclusive grant joined with broadcaster and event names,
/// as consumed by conflict detection.
#[derive(Debug, Clone, FromRow)]
pub struct ExclusiveGrantRow {
    pub right_id: DbId,
    pub event_id: DbId,
    pub event_title: String,
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub territories_allowed: Vec<String>,
}

impl From<ExclusiveGrantRow> for courtside_core::conflict::GrantCoverage {
    fn from(row: ExclusiveGrantRow) -> Self {
        Self {
            right_id: row.right_id,
            event_id: row.event_id,
            event_title: row.event_title,
            broadcaster_id: row.broadcaster_id,
            broadcaster_name: row.broadcaster_name,
            territories_allowed: row.territories_allowed,
        }
    }
}
