//! Shared query parameter types and parsing helpers.
//!
//! Comma-separated list parameters (`?event_ids=1,2&territories=FR,BE`)
//! arrive as plain strings; the helpers here split and validate them.

use serde::Deserialize;

use courtside_core::error::CoreError;
use courtside_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `courtside_core::paging` before hitting the
/// repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Split a comma-separated parameter into trimmed, non-empty items.
pub fn parse_csv(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma-separated id list, rejecting non-numeric items.
pub fn parse_csv_ids(raw: Option<&str>) -> Result<Vec<DbId>, CoreError> {
    parse_csv(raw)
        .iter()
        .map(|item| {
            item.parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("Invalid id '{item}' in list")))
        })
        .collect()
}
