//! Repository for the `pricing_tier_configs` table.

use sqlx::PgPool;

use crate::models::pricing::{PricingTierConfig, TierBandRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "tier, min_price, base_price, max_price, updated_at";

/// Provides read and upsert access to per-tier price bands.
pub struct PricingTierConfigRepo;

impl PricingTierConfigRepo {
    /// List all tier bands, highest base price first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PricingTierConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pricing_tier_configs ORDER BY base_price DESC"
        );
        sqlx::query_as::<_, PricingTierConfig>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find the band for one tier.
    pub async fn find_by_tier(
        pool: &PgPool,
        tier: &str,
    ) -> Result<Option<PricingTierConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing_tier_configs WHERE tier = $1");
        sqlx::query_as::<_, PricingTierConfig>(&query)
            .bind(tier)
            .fetch_optional(pool)
            .await
    }

    /// Upsert the band for one tier. Band ordering is validated by the
    /// caller before this runs; the CHECK constraint is the last line of
    /// defence.
    pub async fn upsert(
        pool: &PgPool,
        tier: &str,
        band: &TierBandRequest,
    ) -> Result<PricingTierConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing_tier_configs (tier, min_price, base_price, max_price)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (tier) DO UPDATE SET
                min_price = EXCLUDED.min_price,
                base_price = EXCLUDED.base_price,
                max_price = EXCLUDED.max_price,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingTierConfig>(&query)
            .bind(tier)
            .bind(band.min_price)
            .bind(band.base_price)
            .bind(band.max_price)
            .fetch_one(pool)
            .await
    }
}
