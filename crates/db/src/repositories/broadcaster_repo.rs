//! Repository for the `broadcasters` table.

use courtside_core::types::DbId;
use sqlx::PgPool;

use crate::models::broadcaster::{Broadcaster, CreateBroadcaster, UpdateBroadcaster};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, legal_name, status, created_at, updated_at";

/// Provides CRUD operations for broadcasters.
pub struct BroadcasterRepo;

impl BroadcasterRepo {
    /// Insert a new broadcaster with `pending` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBroadcaster,
    ) -> Result<Broadcaster, sqlx::Error> {
        let query = format!(
            "INSERT INTO broadcasters (name, legal_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcaster>(&query)
            .bind(&input.name)
            .bind(&input.legal_name)
            .fetch_one(pool)
            .await
    }

    /// Find a broadcaster by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Broadcaster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM broadcasters WHERE id = $1");
        sqlx::query_as::<_, Broadcaster>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List broadcasters ordered by name, paginated.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Broadcaster>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM broadcasters ORDER BY name ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Broadcaster>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a broadcaster. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBroadcaster,
    ) -> Result<Option<Broadcaster>, sqlx::Error> {
        let query = format!(
            "UPDATE broadcasters SET
                name = COALESCE($2, name),
                legal_name = COALESCE($3, legal_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcaster>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.legal_name)
            .fetch_optional(pool)
            .await
    }

    /// Set a broadcaster's status. Transition legality is validated by the
    /// caller against the lifecycle table before this runs.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Broadcaster>, sqlx::Error> {
        let query = format!(
            "UPDATE broadcasters SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Broadcaster>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
