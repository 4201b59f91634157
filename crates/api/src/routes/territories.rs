//! Route definitions for territory reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::territories;
use crate::state::AppState;

/// Territory routes mounted at `/territories`.
///
/// ```text
/// GET  /    list_territories
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(territories::list_territories))
}
