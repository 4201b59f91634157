//! Territory reference data model.

use courtside_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `territories` table. Immutable reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Territory {
    pub code: String,
    pub region: String,
    pub created_at: Timestamp,
}
