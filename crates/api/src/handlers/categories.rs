//! Handlers for the `/categories` resource (public tree + admin CRUD).
//!
//! Re-parenting updates run the walk-up-the-parent-chain cycle check from
//! `vitrine_core::taxonomy` before anything is written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitrine_core::error::CoreError;
use vitrine_core::taxonomy::would_create_cycle;
use vitrine_core::types::DbId;
use vitrine_db::models::category::{
    build_category_tree, Category, CategoryTreeNode, CreateCategory, UpdateCategory,
};
use vitrine_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_slug;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
}

/// Request body for `PUT /admin/categories/{id}`.
///
/// `parent_id: Some` re-parents the category; `make_root: true` moves it to
/// the top level; neither leaves the parent untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub make_root: bool,
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories/tree
///
/// The full category hierarchy as nested nodes, ordered by `sort_order`
/// then name within each level.
pub async fn category_tree(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryTreeNode>>>> {
    let rows = CategoryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(build_category_tree(rows))))
}

/// GET /api/v1/categories/{slug}
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundSlug {
                entity: "Category",
                slug,
            })
        })?;
    Ok(Json(DataResponse::new(category)))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/categories
///
/// Flat category list for the admin tree editor.
pub async fn admin_list_categories(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(categories)))
}

/// POST /api/v1/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }
    let slug = resolve_slug(&input.name, input.slug)?;

    // A new category cannot be part of a cycle, but its parent must exist.
    if let Some(parent_id) = input.parent_id {
        ensure_parent_exists(&state, parent_id).await?;
    }

    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            name: input.name,
            slug,
            parent_id: input.parent_id,
            sort_order: input.sort_order,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Re-parenting is validated against the current hierarchy: the new parent
/// must exist and must not be the category itself or any of its
/// descendants.
pub async fn update_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<Json<Category>> {
    let existing = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "Category name must not be empty".into(),
        )));
    }

    let slug = match input.slug {
        Some(slug) => Some(resolve_slug("", Some(slug))?),
        None => None,
    };

    // Compute the effective parent: explicit root, new parent, or unchanged.
    let parent_id = if input.make_root {
        None
    } else {
        match input.parent_id {
            Some(new_parent) => {
                ensure_parent_exists(&state, new_parent).await?;

                let parents = CategoryRepo::parent_map(&state.pool).await?;
                if would_create_cycle(&parents, id, new_parent) {
                    return Err(AppError::Core(CoreError::Conflict(format!(
                        "Cannot move category {id} under {new_parent}: it would become its own ancestor"
                    ))));
                }
                Some(new_parent)
            }
            None => existing.parent_id,
        }
    };

    let category = CategoryRepo::update(
        &state.pool,
        id,
        &UpdateCategory {
            name: input.name,
            slug,
            parent_id,
            sort_order: input.sort_order,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    }))?;

    Ok(Json(category))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Refuses to delete a category that still has children or products.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let child_count = CategoryRepo::child_count(&state.pool, id).await?;
    if child_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete category: {child_count} subcategorie(s) still belong to it"
        ))));
    }

    let product_count = CategoryRepo::product_count(&state.pool, id).await?;
    if product_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete category: {product_count} product(s) are still filed under it"
        ))));
    }

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_parent_exists(state: &AppState, parent_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, parent_id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Parent category {parent_id} does not exist"
        ))))?;
    Ok(())
}
