//! Repository for the `catalogues` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::catalogue::{Catalogue, CreateCatalogue, UpdateCatalogue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, file_url, cover_image_url, season, \
                       is_published, created_at, updated_at";

/// Provides CRUD operations for catalogues.
pub struct CatalogueRepo;

impl CatalogueRepo {
    /// Insert a new catalogue, returning the created row.
    ///
    /// Catalogues default to unpublished.
    pub async fn create(pool: &PgPool, input: &CreateCatalogue) -> Result<Catalogue, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalogues
                (title, slug, description, file_url, cover_image_url, season, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Catalogue>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.file_url)
            .bind(&input.cover_image_url)
            .bind(&input.season)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a catalogue by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Catalogue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM catalogues WHERE id = $1");
        sqlx::query_as::<_, Catalogue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a catalogue by its public slug.
    ///
    /// With `published_only`, unpublished catalogues are invisible.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Catalogue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catalogues WHERE slug = $1 AND (NOT $2 OR is_published)"
        );
        sqlx::query_as::<_, Catalogue>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// List catalogues, newest first.
    ///
    /// With `published_only`, only published catalogues are returned, as on
    /// the public site.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
    ) -> Result<Vec<Catalogue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catalogues WHERE (NOT $1 OR is_published)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Catalogue>(&query)
            .bind(published_only)
            .fetch_all(pool)
            .await
    }

    /// Update a catalogue. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCatalogue,
    ) -> Result<Option<Catalogue>, sqlx::Error> {
        let query = format!(
            "UPDATE catalogues SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                file_url = COALESCE($5, file_url),
                cover_image_url = COALESCE($6, cover_image_url),
                season = COALESCE($7, season),
                is_published = COALESCE($8, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Catalogue>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.file_url)
            .bind(&input.cover_image_url)
            .bind(&input.season)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a catalogue by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalogues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
