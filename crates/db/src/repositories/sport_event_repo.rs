//! Repository for the `sport_events` table.

use courtside_core::types::DbId;
use sqlx::PgPool;

use crate::models::sport_event::{CreateSportEvent, SportEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, sport_id, league_id, starts_at, created_at, updated_at";

/// Provides accessors for the slim event catalog.
pub struct SportEventRepo;

impl SportEventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSportEvent,
    ) -> Result<SportEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO sport_events (title, sport_id, league_id, starts_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SportEvent>(&query)
            .bind(&input.title)
            .bind(input.sport_id)
            .bind(input.league_id)
            .bind(input.starts_at)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SportEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sport_events WHERE id = $1");
        sqlx::query_as::<_, SportEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events by start time descending, paginated.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SportEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sport_events ORDER BY starts_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, SportEvent>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
