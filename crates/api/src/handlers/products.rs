//! Handlers for the `/products` resource (public listing/search + admin
//! CRUD).
//!
//! The listing pipeline resolves slug facets to ids, then hands one
//! `ProductFilter` to the repository, which runs a count plus a paginated
//! page query.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitrine_core::error::CoreError;
use vitrine_core::search::{clamp_limit, clamp_offset, like_pattern, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vitrine_core::types::DbId;
use vitrine_db::models::product::{
    CreateProduct, ProductFilter, ProductImageInput, ProductPage, ProductWithImages,
    UpdateProduct,
};
use vitrine_db::repositories::{BrandRepo, CategoryRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ProductListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
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

/// Request body for `PUT /admin/products/{id}`.
///
/// Omitted fields keep their current values. Changing `category_id` without
/// supplying `subcategory_id` clears the subcategory, since the old one
/// belongs to the old category. `images`, when present, replaces the whole
/// image set.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
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

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// Filtered, paginated product listing over up to four optional facets:
/// brand, category, subcategory (all by slug), and free text. Only
/// published products are visible.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<ProductPage>>> {
    let page = run_listing(&state, params, true).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /api/v1/products/{slug}
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProductWithImages>>> {
    let product = ProductRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundSlug {
                entity: "Product",
                slug,
            })
        })?;
    Ok(Json(DataResponse::new(product)))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/products
///
/// Same pipeline as the public listing, with unpublished products included.
pub async fn admin_list_products(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<ProductPage>>> {
    let page = run_listing(&state, params, false).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /api/v1/admin/products/{id}
pub async fn admin_get_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductWithImages>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse::new(product)))
}

/// POST /api/v1/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductWithImages>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Product name must not be empty".into(),
        )));
    }
    if input.price_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }
    let slug = resolve_slug(&input.name, input.slug)?;

    ensure_brand_exists(&state, input.brand_id).await?;
    ensure_category_exists(&state, input.category_id).await?;
    if let Some(subcategory_id) = input.subcategory_id {
        ensure_subcategory_of(&state, subcategory_id, input.category_id).await?;
    }

    let product = ProductRepo::create(
        &state.pool,
        &CreateProduct {
            name: input.name,
            slug,
            description: input.description,
            price_cents: input.price_cents,
            brand_id: input.brand_id,
            category_id: input.category_id,
            subcategory_id: input.subcategory_id,
            is_published: input.is_published,
            is_featured: input.is_featured,
            images: input.images,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductWithImages>> {
    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?
        .product;

    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Product name must not be empty".into(),
        )));
    }
    if input.price_cents.is_some_and(|p| p < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }

    let slug = match input.slug {
        Some(slug) => Some(resolve_slug("", Some(slug))?),
        None => None,
    };

    if let Some(brand_id) = input.brand_id {
        ensure_brand_exists(&state, brand_id).await?;
    }

    // Effective category after this update, for the subcategory invariant.
    let effective_category = input.category_id.unwrap_or(existing.category_id);
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    // Subcategory resolution: a supplied value is validated against the
    // effective category; a category change without one clears it; otherwise
    // the current value is kept.
    let subcategory_id = match input.subcategory_id {
        Some(subcategory_id) => {
            ensure_subcategory_of(&state, subcategory_id, effective_category).await?;
            Some(subcategory_id)
        }
        None if input.category_id.is_some_and(|c| c != existing.category_id) => None,
        None => existing.subcategory_id,
    };

    let product = ProductRepo::update(
        &state.pool,
        id,
        &UpdateProduct {
            name: input.name,
            slug,
            description: input.description,
            price_cents: input.price_cents,
            brand_id: input.brand_id,
            category_id: input.category_id,
            subcategory_id,
            is_published: input.is_published,
            is_featured: input.is_featured,
            images: input.images,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    }))?;

    Ok(Json(product))
}

/// DELETE /api/v1/admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Listing pipeline
// ---------------------------------------------------------------------------

/// Resolve slug facets and run the filter. An unknown facet slug matches
/// nothing and short-circuits to an empty page.
async fn run_listing(
    state: &AppState,
    params: ProductListParams,
    published_only: bool,
) -> AppResult<ProductPage> {
    let mut filter = ProductFilter {
        pattern: params.q.as_deref().and_then(like_pattern),
        published_only,
        limit: params.limit,
        offset: params.offset,
        ..ProductFilter::default()
    };

    if let Some(brand_slug) = &params.brand {
        match BrandRepo::find_by_slug(&state.pool, brand_slug).await? {
            Some(brand) => filter.brand_id = Some(brand.id),
            None => return Ok(empty_page(&filter)),
        }
    }

    if let Some(category_slug) = &params.category {
        match CategoryRepo::find_by_slug(&state.pool, category_slug).await? {
            Some(category) => filter.category_id = Some(category.id),
            None => return Ok(empty_page(&filter)),
        }
    }

    if let Some(subcategory_slug) = &params.subcategory {
        match CategoryRepo::find_by_slug(&state.pool, subcategory_slug).await? {
            Some(subcategory) => filter.subcategory_id = Some(subcategory.id),
            None => return Ok(empty_page(&filter)),
        }
    }

    Ok(ProductRepo::search(&state.pool, &filter).await?)
}

fn empty_page(filter: &ProductFilter) -> ProductPage {
    ProductPage {
        total_count: 0,
        items: Vec::new(),
        limit: clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(filter.offset),
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

async fn ensure_brand_exists(state: &AppState, brand_id: DbId) -> AppResult<()> {
    BrandRepo::find_by_id(&state.pool, brand_id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Brand {brand_id} does not exist"
        ))))?;
    Ok(())
}

async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} does not exist"
        ))))?;
    Ok(())
}

/// A product's subcategory must be a direct child of its category.
async fn ensure_subcategory_of(
    state: &AppState,
    subcategory_id: DbId,
    category_id: DbId,
) -> AppResult<()> {
    let subcategory = CategoryRepo::find_by_id(&state.pool, subcategory_id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Subcategory {subcategory_id} does not exist"
        ))))?;

    if subcategory.parent_id != Some(category_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category {subcategory_id} is not a subcategory of {category_id}"
        ))));
    }
    Ok(())
}
