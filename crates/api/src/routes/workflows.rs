//! Route definitions for workflow trigger records.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflows;
use crate::state::AppState;

/// Workflow routes mounted at `/workflows`.
///
/// ```text
/// POST   /trigger               trigger_workflow (admin+)
/// GET    /jobs                  list_jobs
/// GET    /jobs/{id}             get_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trigger", post(workflows::trigger_workflow))
        .route("/jobs", get(workflows::list_jobs))
        .route("/jobs/{job_id}", get(workflows::get_job))
}
