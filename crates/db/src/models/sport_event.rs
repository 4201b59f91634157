//! Event catalog models (slim: what the rights/pricing engine joins on).

use courtside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `sport_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SportEvent {
    pub id: DbId,
    pub title: String,
    pub sport_id: DbId,
    pub league_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSportEvent {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub sport_id: DbId,
    pub league_id: Option<DbId>,
    pub starts_at: Timestamp,
}
