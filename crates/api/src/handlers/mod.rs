//! HTTP handlers, one module per resource.

pub mod auth;
pub mod brands;
pub mod catalogues;
pub mod categories;
pub mod products;

use vitrine_core::error::CoreError;
use vitrine_core::slug::{is_valid_slug, slugify};

use crate::error::AppError;

/// Resolve the slug for a create/update payload.
///
/// A client-supplied slug is validated as-is; otherwise one is derived from
/// the display name. Rejects names that yield no usable slug (e.g. pure
/// punctuation).
pub(crate) fn resolve_slug(name: &str, supplied: Option<String>) -> Result<String, AppError> {
    match supplied {
        Some(slug) => {
            if !is_valid_slug(&slug) {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Invalid slug '{slug}': expected lowercase alphanumeric segments joined by hyphens"
                ))));
            }
            Ok(slug)
        }
        None => slugify(name).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Name '{name}' does not yield a usable slug; supply one explicitly"
            )))
        }),
    }
}
