//! Category API Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::api::DeleteResponse;
use crate::core::AppState;
use crate::db::repository::category;
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /categories - all categories with nested products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /categories/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
        })?;
    Ok(Json(category))
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let category = category::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::CategoryNameExists, msg)
            }
            other => other.into(),
        })?;

    tracing::info!(id = category.id, name = %category.name, "Category created");
    Ok(Json(category))
}

/// PATCH /categories/:id - partial merge
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let category = category::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::CategoryNameExists, msg)
            }
            other => other.into(),
        })?;
    Ok(Json(category))
}

/// DELETE /categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = category::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        ));
    }

    tracing::info!(id, "Category deleted");
    Ok(Json(DeleteResponse::new(format!(
        "Category {id} deleted"
    ))))
}
