//! Handlers for the `/brands` resource (public browse + admin CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::brand::{Brand, BrandWithCount, CreateBrand, UpdateBrand};
use vitrine_db::repositories::BrandRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/brands`.
#[derive(Debug, Deserialize)]
pub struct CreateBrandRequest {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/brands
///
/// List all brands for the public brand index.
pub async fn list_brands(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Brand>>>> {
    let brands = BrandRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(brands)))
}

/// GET /api/v1/brands/{slug}
pub async fn get_brand(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Brand>>> {
    let brand = BrandRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundSlug {
                entity: "Brand",
                slug,
            })
        })?;
    Ok(Json(DataResponse::new(brand)))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/brands
///
/// List brands with product counts for the admin panel.
pub async fn admin_list_brands(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<BrandWithCount>>>> {
    let brands = BrandRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse::new(brands)))
}

/// POST /api/v1/admin/brands
pub async fn create_brand(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<CreateBrandRequest>,
) -> AppResult<(StatusCode, Json<Brand>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Brand name must not be empty".into(),
        )));
    }
    let slug = resolve_slug(&input.name, input.slug)?;

    let brand = BrandRepo::create(
        &state.pool,
        &CreateBrand {
            name: input.name,
            slug,
            description: input.description,
            logo_url: input.logo_url,
            website_url: input.website_url,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(brand)))
}

/// PUT /api/v1/admin/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateBrand>,
) -> AppResult<Json<Brand>> {
    if let Some(slug) = input.slug.take() {
        // Re-validate a client-supplied slug; names are not re-sluggified on
        // rename so existing links stay stable.
        input.slug = Some(resolve_slug("", Some(slug))?);
    }
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Brand name must not be empty".into(),
        )));
    }

    let brand = BrandRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }))?;

    Ok(Json(brand))
}

/// DELETE /api/v1/admin/brands/{id}
///
/// Refuses to delete a brand that still has products.
pub async fn delete_brand(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let product_count = BrandRepo::product_count(&state.pool, id).await?;
    if product_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete brand: {product_count} product(s) still reference it"
        ))));
    }

    let deleted = BrandRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
