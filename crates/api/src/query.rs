//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Query parameters for the product listing pipeline
/// (`?brand=&category=&subcategory=&q=&limit=&offset=`).
///
/// Facets are public slugs; all of them are optional and combinable. Used by
/// both the public listing and the admin listing. Limits are clamped in the
/// repository layer via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub brand: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Free-text search over product name and description.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
