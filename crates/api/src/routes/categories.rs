//! Route definitions for categories.
//!
//! Two routers are provided:
//! - `router()` for the public routes mounted at `/categories`
//! - `admin_router()` for the CRUD routes mounted at `/admin/categories`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Public category routes mounted at `/categories`.
///
/// ```text
/// GET /tree    -> category_tree (nested hierarchy)
/// GET /{slug}  -> get_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tree", get(categories::category_tree))
        .route("/{slug}", get(categories::get_category))
}

/// Admin category routes mounted at `/admin/categories`.
///
/// ```text
/// GET    /      -> admin_list_categories (flat, for the tree editor)
/// POST   /      -> create_category
/// PUT    /{id}  -> update_category (cycle-checked re-parenting)
/// DELETE /{id}  -> delete_category (admin only)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::admin_list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
