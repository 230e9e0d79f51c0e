//! Route definitions for authentication.
//!
//! ```text
//! POST /signup  -> signup (public)
//! POST /login   -> login (public)
//! POST /logout  -> logout (requires auth)
//! GET  /me      -> me (requires auth)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
