//! Broadcaster models.

use courtside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `broadcasters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Broadcaster {
    pub id: DbId,
    pub name: String,
    pub legal_name: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a broadcaster. New broadcasters start as `pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBroadcaster {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub legal_name: Option<String>,
}

/// DTO for patching a broadcaster. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBroadcaster {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub legal_name: Option<String>,
}

/// Request body for the status transition endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcasterStatusRequest {
    pub status: String,
}
