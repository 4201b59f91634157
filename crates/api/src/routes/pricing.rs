//! Route definitions for pricing computation, overrides, and history.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::pricing;
use crate::state::AppState;

/// Pricing routes mounted at `/pricing`.
///
/// ```text
/// GET    /history                   list_history
/// GET    /tiers                     list_tier_configs
/// PUT    /tiers/{tier}              update_tier_config (owner)
/// GET    /{event_id}                get_pricing
/// POST   /{event_id}/override       set_override (admin+)
/// POST   /{event_id}/revert         revert_to_computed (admin+)
/// POST   /{event_id}/recompute      recompute (admin+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(pricing::list_history))
        .route("/tiers", get(pricing::list_tier_configs))
        .route("/tiers/{tier}", put(pricing::update_tier_config))
        .route("/{event_id}", get(pricing::get_pricing))
        .route("/{event_id}/override", post(pricing::set_override))
        .route("/{event_id}/revert", post(pricing::revert_to_computed))
        .route("/{event_id}/recompute", post(pricing::recompute))
}
