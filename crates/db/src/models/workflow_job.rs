//! Workflow trigger job records.

use courtside_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `workflow_jobs` table. Status is advanced by the
/// external job runner; this service only creates and reads rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowJob {
    pub id: DbId,
    pub job_name: String,
    pub params: serde_json::Value,
    pub status: String,
    pub detail: Option<String>,
    pub triggered_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for triggering a workflow.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TriggerWorkflowRequest {
    #[validate(length(min = 1, max = 100))]
    pub job_name: String,
    #[serde(default)]
    pub params: serde_json::Value,
}
