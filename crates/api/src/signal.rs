//! Pricing-signal implementations.
//!
//! The upstream pricing-suggestion service is reached over HTTP when
//! `PRICING_SIGNAL_URL` is configured; otherwise recomputation uses a
//! fixed in-process fallback so local development and tests stay
//! deterministic.

use async_trait::async_trait;
use rust_decimal::Decimal;

use courtside_core::error::CoreError;
use courtside_core::pricing;
use courtside_core::pricing_signal::{EventMeta, PricingSignal, SuggestedPricing};

/// HTTP client for the upstream pricing-suggestion service.
pub struct HttpPricingSignal {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPricingSignal {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PricingSignal for HttpPricingSignal {
    async fn suggest(&self, event: &EventMeta) -> Result<SuggestedPricing, CoreError> {
        let url = format!("{}/suggest", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(|err| CoreError::Internal(format!("Pricing signal request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CoreError::Internal(format!(
                "Pricing signal returned status {}",
                response.status()
            )));
        }

        response
            .json::<SuggestedPricing>()
            .await
            .map_err(|err| CoreError::Internal(format!("Pricing signal response invalid: {err}")))
    }
}

/// Fixed in-process signal: every event resolves to the same tier and
/// price. Used when no upstream endpoint is configured.
pub struct FixedPricingSignal {
    pub tier: String,
    pub price: Decimal,
}

impl Default for FixedPricingSignal {
    fn default() -> Self {
        Self {
            tier: pricing::DEFAULT_TIER.to_string(),
            price: pricing::platform_min_price(),
        }
    }
}

#[async_trait]
impl PricingSignal for FixedPricingSignal {
    async fn suggest(&self, _event: &EventMeta) -> Result<SuggestedPricing, CoreError> {
        Ok(SuggestedPricing {
            tier: self.tier.clone(),
            price: self.price,
        })
    }
}
