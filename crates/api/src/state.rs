use std::sync::Arc;

use courtside_core::pricing_signal::PricingSignal;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: courtside_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Upstream pricing-suggestion service.
    pub pricing_signal: Arc<dyn PricingSignal>,
}
