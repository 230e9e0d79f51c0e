//! Repository for the `products` and `product_images` tables.

use sqlx::{PgPool, Postgres, Transaction};
use vitrine_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vitrine_core::types::DbId;

use crate::models::product::{
    CreateProduct, Product, ProductFilter, ProductImage, ProductImageInput, ProductPage,
    ProductWithImages, UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, description, price_cents, brand_id, category_id, \
                       subcategory_id, is_published, is_featured, created_at, updated_at";

/// Column list for `product_images` queries.
const IMAGE_COLUMNS: &str = "id, product_id, url, alt_text, sort_order, created_at";

/// Shared WHERE clause for the filter pipeline. Each facet bind is
/// null-coalesced so absent facets fall out of the plan; `$5` switches the
/// published-only restriction for public listings.
const FILTER_WHERE: &str = "($1::BIGINT IS NULL OR brand_id = $1)
       AND ($2::BIGINT IS NULL OR category_id = $2)
       AND ($3::BIGINT IS NULL OR subcategory_id = $3)
       AND ($4::TEXT IS NULL OR name ILIKE $4 OR COALESCE(description, '') ILIKE $4)
       AND (NOT $5 OR is_published)";

/// Provides CRUD and filtered listing operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product and its image set in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
    ) -> Result<ProductWithImages, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products
                (name, slug, description, price_cents, brand_id, category_id,
                 subcategory_id, is_published, is_featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, TRUE), COALESCE($9, FALSE))
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.brand_id)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(input.is_published)
            .bind(input.is_featured)
            .fetch_one(&mut *tx)
            .await?;

        let images = insert_images(&mut tx, product.id, &input.images).await?;

        tx.commit().await?;
        Ok(ProductWithImages { product, images })
    }

    /// Find a product (with images) by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithImages>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match product {
            Some(product) => {
                let images = Self::images_for(pool, product.id).await?;
                Ok(Some(ProductWithImages { product, images }))
            }
            None => Ok(None),
        }
    }

    /// Find a product (with images) by its public slug.
    ///
    /// With `published_only`, unpublished products are invisible, as on the
    /// public site.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<ProductWithImages>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE slug = $1 AND (NOT $2 OR is_published)"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await?;

        match product {
            Some(product) => {
                let images = Self::images_for(pool, product.id).await?;
                Ok(Some(ProductWithImages { product, images }))
            }
            None => Ok(None),
        }
    }

    /// Run the filter pipeline: one COUNT over the facet WHERE clause, then
    /// one paginated page query (featured first, then newest), then a single
    /// image fetch for the page.
    pub async fn search(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<ProductPage, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);

        let count_query = format!("SELECT COUNT(*) FROM products WHERE {FILTER_WHERE}");
        let total_count = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(filter.brand_id)
            .bind(filter.category_id)
            .bind(filter.subcategory_id)
            .bind(&filter.pattern)
            .bind(filter.published_only)
            .fetch_one(pool)
            .await?;

        if total_count == 0 {
            return Ok(ProductPage {
                total_count,
                items: Vec::new(),
                limit,
                offset,
            });
        }

        let page_query = format!(
            "SELECT {COLUMNS} FROM products WHERE {FILTER_WHERE}
             ORDER BY is_featured DESC, created_at DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        let products = sqlx::query_as::<_, Product>(&page_query)
            .bind(filter.brand_id)
            .bind(filter.category_id)
            .bind(filter.subcategory_id)
            .bind(&filter.pattern)
            .bind(filter.published_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            total_count,
            page_len = products.len(),
            limit,
            offset,
            "Product filter executed"
        );

        let items = attach_images(pool, products).await?;

        Ok(ProductPage {
            total_count,
            items,
            limit,
            offset,
        })
    }

    /// Update a product. When `images` is present the whole image set is
    /// replaced in the same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<ProductWithImages>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                price_cents = COALESCE($5, price_cents),
                brand_id = COALESCE($6, brand_id),
                category_id = COALESCE($7, category_id),
                subcategory_id = $8,
                is_published = COALESCE($9, is_published),
                is_featured = COALESCE($10, is_featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(input.brand_id)
            .bind(input.category_id)
            .bind(input.subcategory_id)
            .bind(input.is_published)
            .bind(input.is_featured)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(product) = product else {
            tx.rollback().await?;
            return Ok(None);
        };

        let images = match &input.images {
            Some(images) => {
                sqlx::query("DELETE FROM product_images WHERE product_id = $1")
                    .bind(product.id)
                    .execute(&mut *tx)
                    .await?;
                insert_images(&mut tx, product.id, images).await?
            }
            None => {
                let query = format!(
                    "SELECT {IMAGE_COLUMNS} FROM product_images
                     WHERE product_id = $1 ORDER BY sort_order ASC, id ASC"
                );
                sqlx::query_as::<_, ProductImage>(&query)
                    .bind(product.id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(ProductWithImages { product, images }))
    }

    /// Delete a product by ID. Images cascade. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the ordered image set for one product.
    pub async fn images_for(pool: &PgPool, id: DbId) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM product_images
             WHERE product_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }
}

/// Insert an image list for a product; `sort_order` is the list position.
async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: DbId,
    images: &[ProductImageInput],
) -> Result<Vec<ProductImage>, sqlx::Error> {
    let mut rows = Vec::with_capacity(images.len());
    for (position, image) in images.iter().enumerate() {
        let query = format!(
            "INSERT INTO product_images (product_id, url, alt_text, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {IMAGE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(&image.url)
            .bind(&image.alt_text)
            .bind(position as i32)
            .fetch_one(&mut **tx)
            .await?;
        rows.push(row);
    }
    Ok(rows)
}

/// Attach image sets to a page of products with a single `ANY($1)` query.
async fn attach_images(
    pool: &PgPool,
    products: Vec<Product>,
) -> Result<Vec<ProductWithImages>, sqlx::Error> {
    let ids: Vec<DbId> = products.iter().map(|p| p.id).collect();
    let query = format!(
        "SELECT {IMAGE_COLUMNS} FROM product_images
         WHERE product_id = ANY($1) ORDER BY sort_order ASC, id ASC"
    );
    let images = sqlx::query_as::<_, ProductImage>(&query)
        .bind(&ids)
        .fetch_all(pool)
        .await?;

    let mut by_product: std::collections::HashMap<DbId, Vec<ProductImage>> =
        std::collections::HashMap::new();
    for image in images {
        by_product.entry(image.product_id).or_default().push(image);
    }

    Ok(products
        .into_iter()
        .map(|product| ProductWithImages {
            images: by_product.remove(&product.id).unwrap_or_default(),
            product,
        })
        .collect())
}
