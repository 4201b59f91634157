//! Repository for the `event_pricing` table.
//!
//! Every pricing mutation writes its history entry in the same
//! transaction: a reader never observes a pricing row whose flags moved
//! without a matching history entry. A failed history append rolls the
//! whole mutation back. Transient storage failures retry the full
//! transaction exactly once before surfacing the error.

use courtside_core::pricing::{
    self, CHANGE_AUTOMATIC, CHANGE_INITIAL, CHANGE_MANUAL, EffectivePricing,
};
use courtside_core::types::{DbId, Price};
use sqlx::{PgPool, Postgres, Transaction};

use crate::is_transient_error;
use crate::models::pricing::EventPricing;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, computed_tier, computed_price, manual_tier, \
    manual_price, is_manual_override, created_at, updated_at";

/// Provides upsert-by-event and atomic mutation operations for pricing.
pub struct EventPricingRepo;

impl EventPricingRepo {
    /// Find the pricing row for an event, if one exists.
    pub async fn find_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Option<EventPricing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_pricing WHERE event_id = $1");
        sqlx::query_as::<_, EventPricing>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a manual override (or disable one), upserting the pricing row
    /// keyed by `event_id` and appending a `manual` history entry, in one
    /// transaction.
    ///
    /// Band validation happens in the handler before this runs.
    pub async fn set_override(
        pool: &PgPool,
        event_id: DbId,
        manual_tier: Option<&str>,
        manual_price: Option<Price>,
        is_manual_override: bool,
        changed_by: Option<DbId>,
    ) -> Result<EventPricing, sqlx::Error> {
        match Self::set_override_tx(
            pool,
            event_id,
            manual_tier,
            manual_price,
            is_manual_override,
            changed_by,
        )
        .await
        {
            Err(err) if is_transient_error(&err) => {
                tracing::warn!(event_id, error = %err, "Transient failure applying override, retrying once");
                Self::set_override_tx(
                    pool,
                    event_id,
                    manual_tier,
                    manual_price,
                    is_manual_override,
                    changed_by,
                )
                .await
            }
            other => other,
        }
    }

    async fn set_override_tx(
        pool: &PgPool,
        event_id: DbId,
        manual_tier: Option<&str>,
        manual_price: Option<Price>,
        is_manual_override: bool,
        changed_by: Option<DbId>,
    ) -> Result<EventPricing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = Self::lock_by_event(&mut tx, event_id).await?;
        let previous = existing.as_ref().map(|row| pricing::effective_pricing(&row.fields()));

        let query = format!(
            "INSERT INTO event_pricing (event_id, manual_tier, manual_price, is_manual_override)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (event_id) DO UPDATE SET
                manual_tier = EXCLUDED.manual_tier,
                manual_price = EXCLUDED.manual_price,
                is_manual_override = EXCLUDED.is_manual_override,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EventPricing>(&query)
            .bind(event_id)
            .bind(manual_tier)
            .bind(manual_price)
            .bind(is_manual_override)
            .fetch_one(&mut *tx)
            .await?;

        let next = pricing::effective_pricing(&updated.fields());
        Self::append_history(&mut tx, updated.id, previous.as_ref(), &next, CHANGE_MANUAL, changed_by)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Clear a manual override, restoring computed values, and append an
    /// `automatic` history entry, in one transaction.
    ///
    /// Returns `None` when no pricing row exists for the event. A row
    /// that is already not overridden is returned unchanged with no
    /// history entry -- the operation is idempotent.
    pub async fn revert_to_computed(
        pool: &PgPool,
        event_id: DbId,
        changed_by: Option<DbId>,
    ) -> Result<Option<EventPricing>, sqlx::Error> {
        match Self::revert_tx(pool, event_id, changed_by).await {
            Err(err) if is_transient_error(&err) => {
                tracing::warn!(event_id, error = %err, "Transient failure reverting override, retrying once");
                Self::revert_tx(pool, event_id, changed_by).await
            }
            other => other,
        }
    }

    async fn revert_tx(
        pool: &PgPool,
        event_id: DbId,
        changed_by: Option<DbId>,
    ) -> Result<Option<EventPricing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(existing) = Self::lock_by_event(&mut tx, event_id).await? else {
            return Ok(None);
        };
        if !existing.is_manual_override {
            return Ok(Some(existing));
        }

        let previous = pricing::effective_pricing(&existing.fields());

        let query = format!(
            "UPDATE event_pricing SET
                is_manual_override = false,
                manual_tier = NULL,
                manual_price = NULL,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EventPricing>(&query)
            .bind(existing.id)
            .fetch_one(&mut *tx)
            .await?;

        let next = pricing::effective_pricing(&updated.fields());
        Self::append_history(&mut tx, updated.id, Some(&previous), &next, CHANGE_AUTOMATIC, changed_by)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Write freshly computed tier/price, leaving manual fields untouched,
    /// and append history in one transaction.
    ///
    /// The first write for an event records `initial`; later writes record
    /// `automatic` with the previous and new computed values. When the
    /// computed values are unchanged nothing is written at all.
    pub async fn apply_computed(
        pool: &PgPool,
        event_id: DbId,
        tier: &str,
        price: Price,
        changed_by: Option<DbId>,
    ) -> Result<EventPricing, sqlx::Error> {
        match Self::apply_computed_tx(pool, event_id, tier, price, changed_by).await {
            Err(err) if is_transient_error(&err) => {
                tracing::warn!(event_id, error = %err, "Transient failure applying computed pricing, retrying once");
                Self::apply_computed_tx(pool, event_id, tier, price, changed_by).await
            }
            other => other,
        }
    }

    async fn apply_computed_tx(
        pool: &PgPool,
        event_id: DbId,
        tier: &str,
        price: Price,
        changed_by: Option<DbId>,
    ) -> Result<EventPricing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = Self::lock_by_event(&mut tx, event_id).await?;
        if let Some(row) = &existing {
            if row.computed_tier.as_deref() == Some(tier) && row.computed_price == Some(price) {
                return Ok(row.clone());
            }
        }

        // Recompute provenance tracks the computed pair, not the effective
        // values: an override can mask the change downstream while the
        // computation still moved.
        let previous = existing.as_ref().map(|row| EffectivePricing {
            tier: row
                .computed_tier
                .clone()
                .unwrap_or_else(|| pricing::DEFAULT_TIER.to_string()),
            price: row.computed_price.unwrap_or_else(pricing::platform_min_price),
        });
        let change_type = if existing.is_some() { CHANGE_AUTOMATIC } else { CHANGE_INITIAL };

        let query = format!(
            "INSERT INTO event_pricing (event_id, computed_tier, computed_price)
             VALUES ($1, $2, $3)
             ON CONFLICT (event_id) DO UPDATE SET
                computed_tier = EXCLUDED.computed_tier,
                computed_price = EXCLUDED.computed_price,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EventPricing>(&query)
            .bind(event_id)
            .bind(tier)
            .bind(price)
            .fetch_one(&mut *tx)
            .await?;

        let next = EffectivePricing {
            tier: tier.to_string(),
            price,
        };
        Self::append_history(&mut tx, updated.id, previous.as_ref(), &next, change_type, changed_by)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Lock the pricing row for an event within a transaction so
    /// concurrent mutations against the same event serialize.
    async fn lock_by_event(
        tx: &mut Transaction<'_, Postgres>,
        event_id: DbId,
    ) -> Result<Option<EventPricing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_pricing WHERE event_id = $1 FOR UPDATE");
        sqlx::query_as::<_, EventPricing>(&query)
            .bind(event_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Append a history entry inside the caller's transaction.
    async fn append_history(
        tx: &mut Transaction<'_, Postgres>,
        event_pricing_id: DbId,
        previous: Option<&EffectivePricing>,
        next: &EffectivePricing,
        change_type: &str,
        changed_by: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO pricing_history
                (event_pricing_id, previous_tier, previous_price, new_tier, new_price,
                 change_type, changed_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(event_pricing_id)
        .bind(previous.map(|p| p.tier.clone()))
        .bind(previous.map(|p| p.price))
        .bind(&next.tier)
        .bind(next.price)
        .bind(change_type)
        .bind(changed_by)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
