//! Route definitions for products.
//!
//! Two routers are provided:
//! - `router()` for the public listing/detail routes mounted at `/products`
//! - `admin_router()` for the CRUD routes mounted at `/admin/products`

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Public product routes mounted at `/products`.
///
/// ```text
/// GET /        -> list_products (?brand=&category=&subcategory=&q=&limit=&offset=)
/// GET /{slug}  -> get_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products))
        .route("/{slug}", get(products::get_product))
}

/// Admin product routes mounted at `/admin/products`.
///
/// ```text
/// GET    /      -> admin_list_products (unpublished included)
/// POST   /      -> create_product
/// GET    /{id}  -> admin_get_product
/// PUT    /{id}  -> update_product
/// DELETE /{id}  -> delete_product (admin only)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::admin_list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::admin_get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
