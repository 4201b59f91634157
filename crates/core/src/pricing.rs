//! Pricing tiers, band validation, and effective-price resolution.
//!
//! Tier and change-type values are stored as TEXT and validated against
//! the constants here. Price arithmetic uses `rust_decimal` throughout;
//! the platform floor and ceiling bound every upstream suggestion.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

pub const TIER_GOLD: &str = "gold";
pub const TIER_SILVER: &str = "silver";
pub const TIER_BRONZE: &str = "bronze";

/// Tier used when nothing has been computed yet.
pub const DEFAULT_TIER: &str = TIER_BRONZE;

/// Validate a pricing tier name.
pub fn validate_tier(tier: &str) -> Result<(), CoreError> {
    match tier {
        TIER_GOLD | TIER_SILVER | TIER_BRONZE => Ok(()),
        other => Err(CoreError::Validation(format!("Unknown pricing tier '{other}'"))),
    }
}

// ---------------------------------------------------------------------------
// History change types
// ---------------------------------------------------------------------------

pub const CHANGE_INITIAL: &str = "initial";
pub const CHANGE_AUTOMATIC: &str = "automatic";
pub const CHANGE_MANUAL: &str = "manual";

// ---------------------------------------------------------------------------
// Platform bounds
// ---------------------------------------------------------------------------

/// Platform-wide price floor. Also the default effective price when no
/// computed or manual price exists yet.
pub fn platform_min_price() -> Decimal {
    Decimal::new(99, 2) // 0.99
}

/// Platform-wide price ceiling for upstream suggestions.
pub fn platform_max_price() -> Decimal {
    Decimal::new(500, 2) // 5.00
}

/// Clamp an upstream price suggestion to the platform bounds.
pub fn clamp_suggested_price(price: Decimal) -> Decimal {
    price.clamp(platform_min_price(), platform_max_price())
}

// ---------------------------------------------------------------------------
// Tier bands
// ---------------------------------------------------------------------------

/// A tier's configured price band.
#[derive(Debug, Clone, Copy)]
pub struct TierBand {
    pub min_price: Decimal,
    pub base_price: Decimal,
    pub max_price: Decimal,
}

/// Validate `min <= base <= max` with a non-negative floor.
pub fn validate_tier_band(tier: &str, band: &TierBand) -> Result<(), CoreError> {
    if band.min_price < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "Tier '{tier}' min price must not be negative"
        )));
    }
    if band.min_price > band.base_price || band.base_price > band.max_price {
        return Err(CoreError::Validation(format!(
            "Tier '{tier}' band must satisfy min <= base <= max, got {} / {} / {}",
            band.min_price, band.base_price, band.max_price
        )));
    }
    Ok(())
}

/// An override price must sit inside the tier's configured band.
pub fn validate_override_price(
    tier: &str,
    price: Decimal,
    band: &TierBand,
) -> Result<(), CoreError> {
    if price < band.min_price || price > band.max_price {
        return Err(CoreError::Validation(format!(
            "Override price {price} is outside the {tier} band [{}, {}]",
            band.min_price, band.max_price
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Effective pricing
// ---------------------------------------------------------------------------

/// Raw pricing fields, independent of storage representation.
#[derive(Debug, Clone, Default)]
pub struct PricingFields {
    pub computed_tier: Option<String>,
    pub computed_price: Option<Decimal>,
    pub manual_tier: Option<String>,
    pub manual_price: Option<Decimal>,
    pub is_manual_override: bool,
}

/// The tier and price downstream consumers should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectivePricing {
    pub tier: String,
    pub price: Decimal,
}

/// Resolve the effective tier and price.
///
/// With an override, each manual field falls back to its computed
/// counterpart; without one, the manual fields are ignored entirely.
/// Final defaults are the bronze tier and the platform floor.
pub fn effective_pricing(fields: &PricingFields) -> EffectivePricing {
    let (tier, price) = if fields.is_manual_override {
        (
            fields.manual_tier.clone().or_else(|| fields.computed_tier.clone()),
            fields.manual_price.or(fields.computed_price),
        )
    } else {
        (fields.computed_tier.clone(), fields.computed_price)
    };

    EffectivePricing {
        tier: tier.unwrap_or_else(|| DEFAULT_TIER.to_string()),
        price: price.unwrap_or_else(platform_min_price),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
