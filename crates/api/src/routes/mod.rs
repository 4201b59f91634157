pub mod broadcasters;
pub mod events;
pub mod health;
pub mod pricing;
pub mod rights;
pub mod territories;
pub mod workflows;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /territories                                      list (auth)
///
/// /broadcasters                                     list, create
/// /broadcasters/{id}                                get, update
/// /broadcasters/{id}/status                         transition (POST)
/// /broadcasters/{id}/packages                       package list
///
/// /events                                           list, create
/// /events/{id}                                      get
/// /events/{id}/grants                               grant list
///
/// /rights/conflicts                                 conflict check (GET)
/// /rights/suggestions                               broadcaster suggestions (GET)
/// /rights/packages                                  list, create
/// /rights/packages/{id}                             get, update
/// /rights/packages/{id}/status                      transition (POST)
/// /rights/grants                                    create
/// /rights/grants/{id}                               get, update, delete (draft)
/// /rights/grants/{id}/status                        transition (POST)
/// /rights/grants/{id}/revoke                        soft revoke (POST)
///
/// /pricing/{event_id}                               effective + raw row (GET)
/// /pricing/{event_id}/override                      manual override (POST, admin+)
/// /pricing/{event_id}/revert                        revert to computed (POST, admin+)
/// /pricing/{event_id}/recompute                     recompute (POST, admin+)
/// /pricing/history                                  history listing (GET)
/// /pricing/tiers                                    band list (GET)
/// /pricing/tiers/{tier}                             band update (PUT, owner)
///
/// /workflows/trigger                                trigger job (POST, admin+)
/// /workflows/jobs                                   job list (GET)
/// /workflows/jobs/{id}                              job status (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/territories", territories::router())
        .nest("/broadcasters", broadcasters::router())
        .nest("/events", events::router())
        .nest("/rights", rights::router())
        .nest("/pricing", pricing::router())
        .nest("/workflows", workflows::router())
}
