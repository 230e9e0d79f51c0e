//! Repository for the `brands` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::brand::{Brand, BrandWithCount, CreateBrand, UpdateBrand};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, slug, description, logo_url, website_url, created_at, updated_at";

/// Provides CRUD operations for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, slug, description, logo_url, website_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(&input.website_url)
            .fetch_one(pool)
            .await
    }

    /// Find a brand by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a brand by its public slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE slug = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all brands, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY name ASC");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// List all brands with their product counts, ordered by name ascending.
    /// Used by the admin panel.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<BrandWithCount>, sqlx::Error> {
        sqlx::query_as::<_, BrandWithCount>(
            "SELECT b.id, b.name, b.slug, b.description, b.logo_url, b.website_url,
                    COUNT(p.id) AS product_count, b.created_at, b.updated_at
             FROM brands b
             LEFT JOIN products p ON p.brand_id = b.id
             GROUP BY b.id
             ORDER BY b.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a brand. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBrand,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                logo_url = COALESCE($5, logo_url),
                website_url = COALESCE($6, website_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(&input.website_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a brand by ID. Returns `true` if a row was removed.
    ///
    /// Callers must run the product-count guard first; the RESTRICT foreign
    /// key turns a missed guard into a database error rather than an orphan.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the products referencing a brand. Backs the deletion guard.
    pub async fn product_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE brand_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
