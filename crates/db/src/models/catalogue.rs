//! Catalogue (seasonal lookbook) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A catalogue row from the `catalogues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Catalogue {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// URL of the hosted PDF; uploads happen outside this service.
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub season: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new catalogue. `slug` is already resolved by the
/// caller. Catalogues start unpublished unless stated otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCatalogue {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub season: Option<String>,
    pub is_published: Option<bool>,
}

/// DTO for updating an existing catalogue. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCatalogue {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub season: Option<String>,
    pub is_published: Option<bool>,
}
