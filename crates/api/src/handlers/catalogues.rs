//! Handlers for the `/catalogues` resource (public browse + admin CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::catalogue::{Catalogue, CreateCatalogue, UpdateCatalogue};
use vitrine_db::repositories::CatalogueRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/catalogues`.
#[derive(Debug, Deserialize)]
pub struct CreateCatalogueRequest {
    pub title: String,
    /// Derived from `title` when omitted.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub season: Option<String>,
    pub is_published: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/catalogues
///
/// Published catalogues, newest first.
pub async fn list_catalogues(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Catalogue>>>> {
    let catalogues = CatalogueRepo::list(&state.pool, true).await?;
    Ok(Json(DataResponse::new(catalogues)))
}

/// GET /api/v1/catalogues/{slug}
pub async fn get_catalogue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Catalogue>>> {
    let catalogue = CatalogueRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundSlug {
                entity: "Catalogue",
                slug,
            })
        })?;
    Ok(Json(DataResponse::new(catalogue)))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/catalogues
///
/// All catalogues, published or not.
pub async fn admin_list_catalogues(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Catalogue>>>> {
    let catalogues = CatalogueRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse::new(catalogues)))
}

/// POST /api/v1/admin/catalogues
pub async fn create_catalogue(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<CreateCatalogueRequest>,
) -> AppResult<(StatusCode, Json<Catalogue>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Catalogue title must not be empty".into(),
        )));
    }
    let slug = resolve_slug(&input.title, input.slug)?;

    let catalogue = CatalogueRepo::create(
        &state.pool,
        &CreateCatalogue {
            title: input.title,
            slug,
            description: input.description,
            file_url: input.file_url,
            cover_image_url: input.cover_image_url,
            season: input.season,
            is_published: input.is_published,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(catalogue)))
}

/// PUT /api/v1/admin/catalogues/{id}
pub async fn update_catalogue(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCatalogue>,
) -> AppResult<Json<Catalogue>> {
    if let Some(slug) = input.slug.take() {
        input.slug = Some(resolve_slug("", Some(slug))?);
    }
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Catalogue title must not be empty".into(),
        )));
    }

    let catalogue = CatalogueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Catalogue",
            id,
        }))?;

    Ok(Json(catalogue))
}

/// DELETE /api/v1/admin/catalogues/{id}
pub async fn delete_catalogue(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CatalogueRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Catalogue",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
