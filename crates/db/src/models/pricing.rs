//! Pricing models: per-event pricing rows, tier bands, history entries.

use courtside_core::pricing::PricingFields;
use courtside_core::types::{DbId, Price, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `event_pricing` table. One row per event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventPricing {
    pub id: DbId,
    pub event_id: DbId,
    pub computed_tier: Option<String>,
    pub computed_price: Option<Price>,
    pub manual_tier: Option<String>,
    pub manual_price: Option<Price>,
    pub is_manual_override: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EventPricing {
    /// Project the row into the storage-independent pricing fields used
    /// by effective-price resolution.
    pub fn fields(&self) -> PricingFields {
        PricingFields {
            computed_tier: self.computed_tier.clone(),
            computed_price: self.computed_price,
            manual_tier: self.manual_tier.clone(),
            manual_price: self.manual_price,
            is_manual_override: self.is_manual_override,
        }
    }
}

/// A row from the `pricing_history` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingHistoryEntry {
    pub id: DbId,
    pub event_pricing_id: DbId,
    pub previous_tier: Option<String>,
    pub previous_price: Option<Price>,
    pub new_tier: Option<String>,
    pub new_price: Option<Price>,
    pub change_type: String,
    pub changed_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// A history entry joined with its event for the listing endpoint.
/// Actor display names are resolved by the console, not here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingHistoryItem {
    pub id: DbId,
    pub event_pricing_id: DbId,
    pub event_id: DbId,
    pub event_title: String,
    pub previous_tier: Option<String>,
    pub previous_price: Option<Price>,
    pub new_tier: Option<String>,
    pub new_price: Option<Price>,
    pub change_type: String,
    pub changed_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `pricing_tier_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingTierConfig {
    pub tier: String,
    pub min_price: Price,
    pub base_price: Price,
    pub max_price: Price,
    pub updated_at: Timestamp,
}

/// Request body for the override endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRequest {
    pub is_manual_override: bool,
    pub manual_tier: Option<String>,
    pub manual_price: Option<Price>,
}

/// Request body for the tier band update endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TierBandRequest {
    pub min_price: Price,
    pub base_price: Price,
    pub max_price: Price,
}
