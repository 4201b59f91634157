//! Route definitions for the event catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::{events, rights_grants};
use crate::state::AppState;

/// Event catalog routes mounted at `/events`.
///
/// ```text
/// GET    /                      list_events
/// POST   /                      create_event
/// GET    /{id}                  get_event
/// GET    /{id}/grants           list_grants_for_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/{event_id}", get(events::get_event))
        .route(
            "/{event_id}/grants",
            get(rights_grants::list_grants_for_event),
        )
}
