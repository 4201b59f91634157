//! Handlers for territory reference data.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use courtside_db::repositories::TerritoryRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/territories
///
/// List the territory catalog, grouped by region.
pub async fn list_territories(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<impl IntoResponse> {
    let territories = TerritoryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: territories }))
}
