pub mod auth;
pub mod brands;
pub mod catalogues;
pub mod categories;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public; first user is admin)
/// /auth/login                       login (public)
/// /auth/logout                      logout (requires auth)
/// /auth/me                          current user (requires auth)
///
/// /brands                           public brand index
/// /brands/{slug}                    public brand page
///
/// /categories/tree                  public nested category tree
/// /categories/{slug}                public category page
///
/// /products                         public filtered listing
///                                   (?brand=&category=&subcategory=&q=&limit=&offset=)
/// /products/{slug}                  public product page
///
/// /catalogues                       public catalogue index (published only)
/// /catalogues/{slug}                public catalogue page
///
/// /admin/brands                     list (with counts), create
/// /admin/brands/{id}                update, delete
/// /admin/categories                 list (flat), create
/// /admin/categories/{id}            update (cycle-checked), delete
/// /admin/products                   list (unpublished included), create
/// /admin/products/{id}              get, update, delete
/// /admin/catalogues                 list (unpublished included), create
/// /admin/catalogues/{id}            update, delete
/// ```
///
/// All `/admin` routes require an authenticated session; deletes require
/// the admin role.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (signup, login, logout, me).
        .nest("/auth", auth::router())
        // Public catalog browse.
        .nest("/brands", brands::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/catalogues", catalogues::router())
        // Admin panel CRUD.
        .nest("/admin/brands", brands::admin_router())
        .nest("/admin/categories", categories::admin_router())
        .nest("/admin/products", products::admin_router())
        .nest("/admin/catalogues", catalogues::admin_router())
}
