//! Repository for the `workflow_jobs` table.
//!
//! Jobs are created here and advanced by the external runner; this
//! service never transitions a job itself.

use courtside_core::types::DbId;
use sqlx::PgPool;

use crate::models::workflow_job::WorkflowJob;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, job_name, params, status, detail, triggered_by, created_at, updated_at";

/// Provides create and poll operations for workflow trigger records.
pub struct WorkflowJobRepo;

impl WorkflowJobRepo {
    /// Insert a new job with `queued` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        job_name: &str,
        params: &serde_json::Value,
        triggered_by: Option<DbId>,
    ) -> Result<WorkflowJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_jobs (job_name, params, triggered_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowJob>(&query)
            .bind(job_name)
            .bind(params)
            .bind(triggered_by)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkflowJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflow_jobs WHERE id = $1");
        sqlx::query_as::<_, WorkflowJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs newest first, paginated.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkflowJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_jobs ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, WorkflowJob>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
