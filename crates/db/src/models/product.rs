//! Product entity model, DTOs, and listing/search shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Price in minor currency units. Money is never stored as a float.
    pub price_cents: i64,
    pub brand_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: Option<DbId>,
    pub is_published: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An image URL row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// A product together with its ordered image set.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
}

/// Image payload inside product create/update. `sort_order` is the position
/// in the submitted list.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductImageInput {
    pub url: String,
    pub alt_text: Option<String>,
}

/// DTO for creating a new product. `slug` is already resolved by the
/// caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub brand_id: DbId,
    pub category_id: DbId,
    pub subcategory_id: Option<DbId>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub images: Vec<ProductImageInput>,
}

/// DTO for updating an existing product.
///
/// All scalar fields follow COALESCE semantics (only non-`None` values are
/// applied) except `subcategory_id`, which is written as given -- the
/// handler computes the effective value so a category change can clear a
/// stale subcategory. `images`, when present, replaces the whole image set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub brand_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub images: Option<Vec<ProductImageInput>>,
}

/// Resolved filter facets for the product listing pipeline.
///
/// Facet ids are already resolved from slugs by the handler; `None` means
/// the facet is absent. `pattern` is a pre-escaped ILIKE pattern from
/// `vitrine_core::search::like_pattern`.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub brand_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
    pub pattern: Option<String>,
    /// Public listings only see published products; the admin panel sets
    /// this to `false`.
    pub published_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of filtered products plus the total match count.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub total_count: i64,
    pub items: Vec<ProductWithImages>,
    pub limit: i64,
    pub offset: i64,
}
