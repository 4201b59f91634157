//! Handlers for the slim event catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use courtside_core::error::CoreError;
use courtside_core::paging;
use courtside_core::types::DbId;
use courtside_db::models::sport_event::CreateSportEvent;
use courtside_db::repositories::SportEventRepo;
use courtside_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Reject with 404 when the event does not exist.
pub async fn ensure_event_exists(pool: &DbPool, event_id: DbId) -> Result<(), AppError> {
    SportEventRepo::find_by_id(pool, event_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "SportEvent",
                id: event_id,
            })
        })
}

/// POST /api/v1/events
///
/// Create a catalog event.
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<CreateSportEvent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let event = SportEventRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = user.user_id, event_id = event.id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events
///
/// List catalog events, newest first, paginated.
pub async fn list_events(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = paging::clamp_limit(params.limit, 50, 200);
    let offset = paging::clamp_offset(params.offset);

    let events = SportEventRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = SportEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "SportEvent",
                id: event_id,
            })
        })?;
    Ok(Json(DataResponse { data: event }))
}
