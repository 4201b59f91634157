//! Seam for the upstream pricing-suggestion service.
//!
//! Recomputation asks an external advisory service for a tier and price
//! given event metadata. The service is injected behind this trait so
//! the engine is testable with a fixed in-process implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Event metadata forwarded to the upstream service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EventMeta {
    pub event_id: DbId,
    pub title: String,
    pub sport_id: DbId,
    pub league_id: Option<DbId>,
    pub starts_at: Timestamp,
}

/// A tier/price suggestion from the upstream service.
///
/// The price is advisory: callers clamp it to the platform bounds and
/// validate the tier before persisting anything.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SuggestedPricing {
    pub tier: String,
    pub price: Decimal,
}

/// Upstream pricing-suggestion service.
#[async_trait]
pub trait PricingSignal: Send + Sync {
    async fn suggest(&self, event: &EventMeta) -> Result<SuggestedPricing, CoreError>;
}
