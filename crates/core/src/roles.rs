//! Well-known role name constants.
//!
//! These must match the values written by the signup flow and any seed data.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
