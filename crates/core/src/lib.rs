//! Vitrine domain foundation.
//!
//! Pure types and helpers shared by the database and API layers. This crate
//! has no internal dependencies so it can be used from any future CLI or
//! worker tooling without dragging in sqlx or axum.

pub mod error;
pub mod roles;
pub mod search;
pub mod slug;
pub mod taxonomy;
pub mod types;
