//! Route definitions for the rights engine: conflict checks, broadcaster
//! suggestions, packages, and grants.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{rights, rights_grants, rights_packages};
use crate::state::AppState;

/// Rights routes mounted at `/rights`.
///
/// ```text
/// GET    /conflicts                 find_conflicts
/// GET    /suggestions               suggest_broadcasters
///
/// GET    /packages                  list_packages
/// POST   /packages                  create_package
/// GET    /packages/{id}             get_package
/// PUT    /packages/{id}             update_package
/// POST   /packages/{id}/status      set_package_status
///
/// POST   /grants                    create_grant
/// GET    /grants/{id}               get_grant
/// PUT    /grants/{id}               update_grant
/// DELETE /grants/{id}               delete_grant (draft only)
/// POST   /grants/{id}/status        set_grant_status
/// POST   /grants/{id}/revoke        revoke_grant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conflicts", get(rights::find_conflicts))
        .route("/suggestions", get(rights::suggest_broadcasters))
        .route(
            "/packages",
            get(rights_packages::list_packages).post(rights_packages::create_package),
        )
        .route(
            "/packages/{package_id}",
            get(rights_packages::get_package).put(rights_packages::update_package),
        )
        .route(
            "/packages/{package_id}/status",
            post(rights_packages::set_package_status),
        )
        .route("/grants", post(rights_grants::create_grant))
        .route(
            "/grants/{grant_id}",
            get(rights_grants::get_grant)
                .put(rights_grants::update_grant)
                .delete(rights_grants::delete_grant),
        )
        .route(
            "/grants/{grant_id}/status",
            post(rights_grants::set_grant_status),
        )
        .route(
            "/grants/{grant_id}/revoke",
            post(rights_grants::revoke_grant),
        )
}
