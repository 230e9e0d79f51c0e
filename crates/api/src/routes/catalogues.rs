//! Route definitions for catalogues.
//!
//! Two routers are provided:
//! - `router()` for the public routes mounted at `/catalogues`
//! - `admin_router()` for the CRUD routes mounted at `/admin/catalogues`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::catalogues;
use crate::state::AppState;

/// Public catalogue routes mounted at `/catalogues`.
///
/// ```text
/// GET /        -> list_catalogues (published only)
/// GET /{slug}  -> get_catalogue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalogues::list_catalogues))
        .route("/{slug}", get(catalogues::get_catalogue))
}

/// Admin catalogue routes mounted at `/admin/catalogues`.
///
/// ```text
/// GET    /      -> admin_list_catalogues (unpublished included)
/// POST   /      -> create_catalogue
/// PUT    /{id}  -> update_catalogue
/// DELETE /{id}  -> delete_catalogue (admin only)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalogues::admin_list_catalogues).post(catalogues::create_catalogue),
        )
        .route(
            "/{id}",
            put(catalogues::update_catalogue).delete(catalogues::delete_catalogue),
        )
}
