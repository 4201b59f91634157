//! Handlers for broadcaster management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use courtside_core::error::CoreError;
use courtside_core::paging;
use courtside_core::rights;
use courtside_core::types::DbId;
use courtside_db::models::broadcaster::{
    Broadcaster, BroadcasterStatusRequest, CreateBroadcaster, UpdateBroadcaster,
};
use courtside_db::repositories::{BroadcasterRepo, RightsPackageRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/broadcasters
///
/// Create a broadcaster. New broadcasters start as `pending`.
pub async fn create_broadcaster(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<CreateBroadcaster>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let broadcaster = BroadcasterRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        broadcaster_id = broadcaster.id,
        "Broadcaster created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: broadcaster })))
}

/// GET /api/v1/broadcasters
///
/// List broadcasters ordered by name, paginated.
pub async fn list_broadcasters(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = paging::clamp_limit(params.limit, 50, 200);
    let offset = paging::clamp_offset(params.offset);

    let broadcasters = BroadcasterRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: broadcasters }))
}

/// GET /api/v1/broadcasters/{broadcaster_id}
pub async fn get_broadcaster(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(broadcaster_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let broadcaster = find_or_404(&state, broadcaster_id).await?;
    Ok(Json(DataResponse { data: broadcaster }))
}

/// PUT /api/v1/broadcasters/{broadcaster_id}
pub async fn update_broadcaster(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(broadcaster_id): Path<DbId>,
    Json(input): Json<UpdateBroadcaster>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let broadcaster = BroadcasterRepo::update(&state.pool, broadcaster_id, &input)
        .await?
        .ok_or_else(|| not_found(broadcaster_id))?;

    tracing::info!(
        user_id = user.user_id,
        broadcaster_id,
        "Broadcaster updated"
    );
    Ok(Json(DataResponse { data: broadcaster }))
}

/// POST /api/v1/broadcasters/{broadcaster_id}/status
///
/// Transition a broadcaster's lifecycle status. Suspension leaves the
/// broadcaster's grants in place; it only removes it from suggestions.
pub async fn set_broadcaster_status(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(broadcaster_id): Path<DbId>,
    Json(input): Json<BroadcasterStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state, broadcaster_id).await?;
    rights::ensure_broadcaster_transition(&existing.status, &input.status)?;

    let broadcaster = BroadcasterRepo::set_status(&state.pool, broadcaster_id, &input.status)
        .await?
        .ok_or_else(|| not_found(broadcaster_id))?;

    tracing::info!(
        user_id = user.user_id,
        broadcaster_id,
        from = %existing.status,
        to = %input.status,
        "Broadcaster status changed"
    );
    Ok(Json(DataResponse { data: broadcaster }))
}

/// GET /api/v1/broadcasters/{broadcaster_id}/packages
///
/// List a broadcaster's rights packages, newest window first.
pub async fn list_broadcaster_packages(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(broadcaster_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_or_404(&state, broadcaster_id).await?;
    let packages = RightsPackageRepo::list_by_broadcaster(&state.pool, broadcaster_id).await?;
    Ok(Json(DataResponse { data: packages }))
}

async fn find_or_404(state: &AppState, broadcaster_id: DbId) -> Result<Broadcaster, AppError> {
    BroadcasterRepo::find_by_id(&state.pool, broadcaster_id)
        .await?
        .ok_or_else(|| not_found(broadcaster_id))
}

fn not_found(broadcaster_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Broadcaster",
        id: broadcaster_id,
    })
}
