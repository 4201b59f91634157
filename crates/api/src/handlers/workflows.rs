//! Handlers for workflow trigger records.
//!
//! Triggering writes a `queued` job row; the external runner picks it up
//! and advances its status. This service never dispatches anything.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use courtside_core::error::CoreError;
use courtside_core::paging;
use courtside_core::types::DbId;
use courtside_db::models::workflow_job::TriggerWorkflowRequest;
use courtside_db::repositories::WorkflowJobRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/workflows/trigger
///
/// Record a workflow trigger for the external runner.
pub async fn trigger_workflow(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<TriggerWorkflowRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let params = if input.params.is_null() {
        serde_json::json!({})
    } else {
        input.params.clone()
    };

    let job =
        WorkflowJobRepo::create(&state.pool, &input.job_name, &params, Some(user.user_id)).await?;

    tracing::info!(
        user_id = user.user_id,
        job_id = job.id,
        job_name = %job.job_name,
        "Workflow triggered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// GET /api/v1/workflows/jobs/{job_id}
///
/// Poll one job's status record.
pub async fn get_job(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = WorkflowJobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "WorkflowJob",
                id: job_id,
            })
        })?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/workflows/jobs
///
/// List recent jobs, newest first, paginated.
pub async fn list_jobs(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = paging::clamp_limit(params.limit, 50, 200);
    let offset = paging::clamp_offset(params.offset);

    let jobs = WorkflowJobRepo::list_recent(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: jobs }))
}
