//! Route definitions for broadcaster management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::broadcasters;
use crate::state::AppState;

/// Broadcaster routes mounted at `/broadcasters`.
///
/// ```text
/// GET    /                      list_broadcasters
/// POST   /                      create_broadcaster
/// GET    /{id}                  get_broadcaster
/// PUT    /{id}                  update_broadcaster
/// POST   /{id}/status           set_broadcaster_status
/// GET    /{id}/packages         list_broadcaster_packages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(broadcasters::list_broadcasters).post(broadcasters::create_broadcaster),
        )
        .route(
            "/{broadcaster_id}",
            get(broadcasters::get_broadcaster).put(broadcasters::update_broadcaster),
        )
        .route(
            "/{broadcaster_id}/status",
            post(broadcasters::set_broadcaster_status),
        )
        .route(
            "/{broadcaster_id}/packages",
            get(broadcasters::list_broadcaster_packages),
        )
}
