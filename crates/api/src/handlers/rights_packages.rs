//! Handlers for rights package management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use courtside_core::error::CoreError;
use courtside_core::paging;
use courtside_core::rights::{self, PACKAGE_EXPIRED};
use courtside_core::territory;
use courtside_core::types::DbId;
use courtside_db::models::rights_package::{
    CreateRightsPackage, PackageStatusRequest, RightsPackage, UpdateRightsPackage,
};
use courtside_db::repositories::{BroadcasterRepo, RightsPackageRepo};
use courtside_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/rights/packages
///
/// Create a rights package in `draft` status.
pub async fn create_package(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(mut input): Json<CreateRightsPackage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    rights::validate_package_scope(&input.scope_type, input.sport_id, input.league_id)?;
    if input.start_at > input.end_at {
        return Err(AppError::Core(CoreError::Validation(
            "Package start_at must not be after end_at".to_string(),
        )));
    }
    input.territories_default = territory::normalize_codes(&input.territories_default)?;

    BroadcasterRepo::find_by_id(&state.pool, input.broadcaster_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Broadcaster",
                id: input.broadcaster_id,
            })
        })?;

    let package = RightsPackageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        package_id = package.id,
        broadcaster_id = package.broadcaster_id,
        "Rights package created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: package })))
}

/// GET /api/v1/rights/packages
///
/// List packages, newest window first, paginated.
pub async fn list_packages(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = paging::clamp_limit(params.limit, 50, 200);
    let offset = paging::clamp_offset(params.offset);

    let packages = RightsPackageRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: packages }))
}

/// GET /api/v1/rights/packages/{package_id}
pub async fn get_package(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(package_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let package = find_or_404(&state.pool, package_id).await?;
    Ok(Json(DataResponse { data: package }))
}

/// PUT /api/v1/rights/packages/{package_id}
///
/// Edit a draft or active package. Expired packages are immutable.
pub async fn update_package(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(package_id): Path<DbId>,
    Json(mut input): Json<UpdateRightsPackage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let existing = find_or_404(&state.pool, package_id).await?;
    if existing.status == PACKAGE_EXPIRED {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot edit an expired package".to_string(),
        )));
    }

    // Validate the window the patch would produce.
    let start_at = input.start_at.unwrap_or(existing.start_at);
    let end_at = input.end_at.unwrap_or(existing.end_at);
    if start_at > end_at {
        return Err(AppError::Core(CoreError::Validation(
            "Package start_at must not be after end_at".to_string(),
        )));
    }

    if let Some(codes) = input.territories_default.take() {
        input.territories_default = Some(territory::normalize_codes(&codes)?);
    }

    let package = RightsPackageRepo::update(&state.pool, package_id, &input)
        .await?
        .ok_or_else(|| not_found(package_id))?;

    tracing::info!(user_id = user.user_id, package_id, "Rights package updated");
    Ok(Json(DataResponse { data: package }))
}

/// POST /api/v1/rights/packages/{package_id}/status
///
/// Transition a package's lifecycle status.
pub async fn set_package_status(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(package_id): Path<DbId>,
    Json(input): Json<PackageStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state.pool, package_id).await?;
    rights::ensure_package_transition(&existing.status, &input.status)?;

    let package = RightsPackageRepo::set_status(&state.pool, package_id, &input.status)
        .await?
        .ok_or_else(|| not_found(package_id))?;

    tracing::info!(
        user_id = user.user_id,
        package_id,
        from = %existing.status,
        to = %input.status,
        "Rights package status changed"
    );
    Ok(Json(DataResponse { data: package }))
}

async fn find_or_404(pool: &DbPool, package_id: DbId) -> Result<RightsPackage, AppError> {
    RightsPackageRepo::find_by_id(pool, package_id)
        .await?
        .ok_or_else(|| not_found(package_id))
}

fn not_found(package_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RightsPackage",
        id: package_id,
    })
}
