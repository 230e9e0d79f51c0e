//! Route definitions for brands.
//!
//! Two routers are provided:
//! - `router()` for the public browse routes mounted at `/brands`
//! - `admin_router()` for the CRUD routes mounted at `/admin/brands`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::brands;
use crate::state::AppState;

/// Public brand routes mounted at `/brands`.
///
/// ```text
/// GET /        -> list_brands
/// GET /{slug}  -> get_brand
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list_brands))
        .route("/{slug}", get(brands::get_brand))
}

/// Admin brand routes mounted at `/admin/brands`.
///
/// ```text
/// GET    /      -> admin_list_brands (with product counts)
/// POST   /      -> create_brand
/// PUT    /{id}  -> update_brand
/// DELETE /{id}  -> delete_brand (admin only)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::admin_list_brands).post(brands::create_brand))
        .route(
            "/{id}",
            put(brands::update_brand).delete(brands::delete_brand),
        )
}
