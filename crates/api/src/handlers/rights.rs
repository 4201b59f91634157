//! Handlers for the conflict check and broadcaster suggestion endpoints.
//!
//! Both are pure read compositions: the repository narrows rows in SQL,
//! `courtside_core` applies the substantive rules. Conflict results are
//! advisory data -- this layer never blocks a mutation because conflicts
//! exist.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use courtside_core::conflict::{self, Conflict, ConflictParams, GrantCoverage};
use courtside_core::rights;
use courtside_core::suggestion::{self, PackageCandidate};
use courtside_core::territory;
use courtside_core::types::{DbId, Timestamp};
use courtside_db::repositories::{RightsEventRepo, RightsPackageRepo};
use courtside_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /rights/conflicts
// ---------------------------------------------------------------------------

/// Query parameters for the conflict check. `event_ids` and
/// `territories` are comma-separated lists.
#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    pub event_ids: Option<String>,
    pub territories: Option<String>,
    pub exclusivity: String,
    pub exclude_broadcaster_id: Option<DbId>,
    pub exclude_right_id: Option<DbId>,
}

/// GET /api/v1/rights/conflicts
///
/// Check a candidate grant against existing active exclusive grants.
pub async fn find_conflicts(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ConflictQuery>,
) -> AppResult<impl IntoResponse> {
    rights::validate_exclusivity(&params.exclusivity)?;
    let event_ids = query::parse_csv_ids(params.event_ids.as_deref())?;
    let raw_codes = query::parse_csv(params.territories.as_deref());
    let territories = territory::normalize_codes(&raw_codes)?;

    let conflict_params = ConflictParams {
        event_ids,
        territories,
        exclusivity: params.exclusivity,
        exclude_broadcaster_id: params.exclude_broadcaster_id,
        exclude_right_id: params.exclude_right_id,
    };

    let conflicts = detect(&state.pool, &conflict_params).await?;
    Ok(Json(DataResponse { data: conflicts }))
}

/// Run the conflict detector for a candidate, skipping the storage query
/// entirely when the candidate cannot conflict.
pub async fn detect(
    pool: &DbPool,
    params: &ConflictParams,
) -> Result<Vec<Conflict>, AppError> {
    if !conflict::can_conflict(params) {
        return Ok(Vec::new());
    }

    let rows = RightsEventRepo::find_active_exclusive_for_events(
        pool,
        &params.event_ids,
        params.exclude_broadcaster_id,
        params.exclude_right_id,
    )
    .await?;
    let grants: Vec<GrantCoverage> = rows.into_iter().map(Into::into).collect();

    Ok(conflict::find_conflicts(params, &grants))
}

// ---------------------------------------------------------------------------
// GET /rights/suggestions
// ---------------------------------------------------------------------------

/// Query parameters for broadcaster suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub sport_id: Option<DbId>,
    pub league_id: Option<DbId>,
    pub event_date: Timestamp,
}

/// GET /api/v1/rights/suggestions
///
/// Suggest broadcasters for an event from matching active packages,
/// most specific scope first.
pub async fn suggest_broadcasters(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<SuggestionQuery>,
) -> AppResult<impl IntoResponse> {
    let rows =
        RightsPackageRepo::find_suggestion_candidates(&state.pool, params.event_date).await?;
    let candidates: Vec<PackageCandidate> = rows.into_iter().map(Into::into).collect();

    let suggestions =
        suggestion::suggest_broadcasters(params.sport_id, params.league_id, &candidates);
    Ok(Json(DataResponse { data: suggestions }))
}
