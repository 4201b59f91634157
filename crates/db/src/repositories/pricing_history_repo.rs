//! Repository for the `pricing_history` table.
//!
//! Read-only by construction: the only insert path lives inside the
//! pricing mutation transactions in `EventPricingRepo`, and no update or
//! delete method exists anywhere. Append-only is a property of the
//! repository surface, not a convention.

use courtside_core::types::DbId;
use sqlx::PgPool;

use crate::models::pricing::{PricingHistoryEntry, PricingHistoryItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_pricing_id, previous_tier, previous_price, new_tier, \
    new_price, change_type, changed_by, created_at";

/// Provides read access to pricing history.
pub struct PricingHistoryRepo;

impl PricingHistoryRepo {
    /// List the most recent history entries across all events, newest
    /// first, joined with event titles for presentation.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<PricingHistoryItem>, sqlx::Error> {
        sqlx::query_as::<_, PricingHistoryItem>(
            "SELECT
                h.id,
                h.event_pricing_id,
                p.event_id,
                e.title AS event_title,
                h.previous_tier,
                h.previous_price,
                h.new_tier,
                h.new_price,
                h.change_type,
                h.changed_by,
                h.created_at
             FROM pricing_history h
             JOIN event_pricing p ON p.id = h.event_pricing_id
             JOIN sport_events e ON e.id = p.event_id
             ORDER BY h.created_at DESC, h.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// List all entries for one pricing row, newest first.
    pub async fn list_for_pricing(
        pool: &PgPool,
        event_pricing_id: DbId,
    ) -> Result<Vec<PricingHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pricing_history
             WHERE event_pricing_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PricingHistoryEntry>(&query)
            .bind(event_pricing_id)
            .fetch_all(pool)
            .await
    }

    /// Count entries for one pricing row.
    pub async fn count_for_pricing(
        pool: &PgPool,
        event_pricing_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM pricing_history WHERE event_pricing_id = $1")
                .bind(event_pricing_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
