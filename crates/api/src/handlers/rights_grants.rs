//! Handlers for per-event rights grants.
//!
//! Mutations return a conflict preview alongside the written grant.
//! Conflicts never block the write here: enforcement is a policy
//! decision left to the console.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use courtside_core::conflict::{Conflict, ConflictParams};
use courtside_core::error::CoreError;
use courtside_core::rights::{self, GRANT_ACTIVE, GRANT_DRAFT, GRANT_REVOKED, PLATFORM_BOTH};
use courtside_core::territory;
use courtside_core::types::DbId;
use courtside_db::models::rights_event::{
    CreateRightsEvent, GrantStatusRequest, RightsEvent, UpdateRightsEvent,
};
use courtside_db::repositories::{BroadcasterRepo, RightsEventRepo, RightsPackageRepo, TerritoryRepo};
use courtside_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::events::ensure_event_exists;
use crate::handlers::rights::detect as detect_conflicts;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// A grant plus the advisory conflicts detected against it.
#[derive(Debug, Serialize)]
pub struct GrantWithConflicts {
    pub grant: RightsEvent,
    pub conflicts: Vec<Conflict>,
}

/// A grant with its effective territory coverage (allowed minus blocked;
/// a code on both lists is excluded).
#[derive(Debug, Serialize)]
pub struct GrantDetail {
    pub grant: RightsEvent,
    pub effective_territories: Vec<String>,
}

/// POST /api/v1/rights/grants
///
/// Create a grant in `draft` status and return it with a conflict
/// preview for its territories.
pub async fn create_grant(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(mut input): Json<CreateRightsEvent>,
) -> AppResult<impl IntoResponse> {
    rights::validate_exclusivity(&input.exclusivity)?;
    let platform = match input.platform.as_deref() {
        Some(value) => {
            rights::validate_platform(value)?;
            value.to_string()
        }
        None => PLATFORM_BOTH.to_string(),
    };

    ensure_event_exists(&state.pool, input.event_id).await?;
    ensure_broadcaster_exists(&state.pool, input.broadcaster_id).await?;
    if let Some(package_id) = input.package_id {
        ensure_package_exists(&state.pool, package_id).await?;
    }

    input.territories_allowed =
        normalize_known_codes(&state.pool, &input.territories_allowed).await?;
    input.territories_blocked =
        normalize_known_codes(&state.pool, &input.territories_blocked).await?;

    let grant = RightsEventRepo::create(&state.pool, &input, &platform).await?;
    let conflicts = preview_conflicts(&state.pool, &grant).await?;

    tracing::info!(
        user_id = user.user_id,
        grant_id = grant.id,
        event_id = grant.event_id,
        broadcaster_id = grant.broadcaster_id,
        conflict_count = conflicts.len(),
        "Rights grant created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GrantWithConflicts { grant, conflicts },
        }),
    ))
}

/// GET /api/v1/rights/grants/{grant_id}
pub async fn get_grant(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(grant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let grant = find_or_404(&state.pool, grant_id).await?;
    let effective_territories =
        territory::effective_coverage(&grant.territories_allowed, &grant.territories_blocked);
    Ok(Json(DataResponse {
        data: GrantDetail {
            grant,
            effective_territories,
        },
    }))
}

/// PUT /api/v1/rights/grants/{grant_id}
///
/// Edit a draft or active grant. The conflict preview excludes the
/// grant itself so edits don't conflict with their own row.
pub async fn update_grant(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(grant_id): Path<DbId>,
    Json(mut input): Json<UpdateRightsEvent>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state.pool, grant_id).await?;
    if existing.status != GRANT_DRAFT && existing.status != GRANT_ACTIVE {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot edit a grant in '{}' status",
            existing.status
        ))));
    }

    if let Some(value) = &input.exclusivity {
        rights::validate_exclusivity(value)?;
    }
    if let Some(value) = &input.platform {
        rights::validate_platform(value)?;
    }
    if let Some(allowed) = input.territories_allowed.take() {
        input.territories_allowed = Some(normalize_known_codes(&state.pool, &allowed).await?);
    }
    if let Some(blocked) = input.territories_blocked.take() {
        input.territories_blocked = Some(normalize_known_codes(&state.pool, &blocked).await?);
    }

    let grant = RightsEventRepo::update(&state.pool, grant_id, &input)
        .await?
        .ok_or_else(|| not_found(grant_id))?;
    let conflicts = preview_conflicts(&state.pool, &grant).await?;

    tracing::info!(
        user_id = user.user_id,
        grant_id,
        conflict_count = conflicts.len(),
        "Rights grant updated"
    );
    Ok(Json(DataResponse {
        data: GrantWithConflicts { grant, conflicts },
    }))
}

/// POST /api/v1/rights/grants/{grant_id}/status
///
/// Transition a grant's lifecycle status. Activating an exclusive grant
/// returns the conflicts it creates -- surfaced, not enforced.
pub async fn set_grant_status(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(grant_id): Path<DbId>,
    Json(input): Json<GrantStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state.pool, grant_id).await?;
    rights::ensure_grant_transition(&existing.status, &input.status)?;

    let grant = RightsEventRepo::set_status(&state.pool, grant_id, &input.status)
        .await?
        .ok_or_else(|| not_found(grant_id))?;

    let conflicts = if grant.status == GRANT_ACTIVE {
        preview_conflicts(&state.pool, &grant).await?
    } else {
        Vec::new()
    };

    tracing::info!(
        user_id = user.user_id,
        grant_id,
        from = %existing.status,
        to = %input.status,
        conflict_count = conflicts.len(),
        "Rights grant status changed"
    );
    Ok(Json(DataResponse {
        data: GrantWithConflicts { grant, conflicts },
    }))
}

/// POST /api/v1/rights/grants/{grant_id}/revoke
///
/// Soft-revoke an active grant. The row stays queryable.
pub async fn revoke_grant(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(grant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state.pool, grant_id).await?;
    rights::ensure_grant_transition(&existing.status, GRANT_REVOKED)?;

    let grant = RightsEventRepo::set_status(&state.pool, grant_id, GRANT_REVOKED)
        .await?
        .ok_or_else(|| not_found(grant_id))?;

    tracing::info!(user_id = user.user_id, grant_id, "Rights grant revoked");
    Ok(Json(DataResponse { data: grant }))
}

/// DELETE /api/v1/rights/grants/{grant_id}
///
/// Hard-delete a draft grant. Anything past draft must be revoked.
pub async fn delete_grant(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(grant_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_or_404(&state.pool, grant_id).await?;
    if existing.status != GRANT_DRAFT {
        return Err(AppError::Core(CoreError::Conflict(
            "Only draft grants can be deleted; revoke instead".to_string(),
        )));
    }

    RightsEventRepo::delete_draft(&state.pool, grant_id).await?;
    tracing::info!(user_id = user.user_id, grant_id, "Draft grant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/events/{event_id}/grants
///
/// List all grants for an event, including revoked and expired ones.
pub async fn list_grants_for_event(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;
    let grants = RightsEventRepo::list_by_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: grants }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the conflict detector for a stored grant, excluding its own
/// broadcaster and row.
async fn preview_conflicts(
    pool: &DbPool,
    grant: &RightsEvent,
) -> Result<Vec<Conflict>, AppError> {
    let params = ConflictParams {
        event_ids: vec![grant.event_id],
        territories: grant.territories_allowed.clone(),
        exclusivity: grant.exclusivity.clone(),
        exclude_broadcaster_id: Some(grant.broadcaster_id),
        exclude_right_id: Some(grant.id),
    };
    detect_conflicts(pool, &params).await
}

/// Normalize territory codes and reject ones missing from the catalog.
async fn normalize_known_codes(
    pool: &DbPool,
    raw: &[String],
) -> Result<Vec<String>, AppError> {
    let codes = territory::normalize_codes(raw)?;
    let missing = TerritoryRepo::find_missing(pool, &codes).await?;
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown territory codes: {}",
            missing.join(", ")
        ))));
    }
    Ok(codes)
}

async fn ensure_broadcaster_exists(pool: &DbPool, broadcaster_id: DbId) -> Result<(), AppError> {
    BroadcasterRepo::find_by_id(pool, broadcaster_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Broadcaster",
                id: broadcaster_id,
            })
        })
}

async fn ensure_package_exists(pool: &DbPool, package_id: DbId) -> Result<(), AppError> {
    RightsPackageRepo::find_by_id(pool, package_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "RightsPackage",
                id: package_id,
            })
        })
}

async fn find_or_404(pool: &DbPool, grant_id: DbId) -> Result<RightsEvent, AppError> {
    RightsEventRepo::find_by_id(pool, grant_id)
        .await?
        .ok_or_else(|| not_found(grant_id))
}

fn not_found(grant_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "RightsEvent",
        id: grant_id,
    })
}
