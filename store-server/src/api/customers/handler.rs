//! Customer API Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::api::DeleteResponse;
use crate::core::AppState;
use crate::db::repository::{customer, RepoError};
use crate::utils::validation::{
    validate_email, validate_optional_text, validate_required_text, MAX_ADDRESS_LEN,
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::{AppError, AppResult, ErrorCode};

fn validate_create(data: &CustomerCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_email(&data.email)?;
    validate_required_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&data.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.zip_code, "zipCode", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.country, "country", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

fn validate_update(data: &CustomerUpdate) -> AppResult<()> {
    if let Some(ref name) = data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref email) = data.email {
        validate_email(email)?;
    }
    validate_optional_text(&data.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&data.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.zip_code, "zipCode", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.country, "country", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

/// Duplicate email maps to its dedicated conflict code
fn map_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::CustomerEmailExists, msg),
        other => other.into(),
    }
}

/// GET /customers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

/// GET /customers/:id - includes order history
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::CustomerNotFound, format!("Customer {id} not found"))
        })?;
    Ok(Json(customer))
}

/// POST /customers - 409 on duplicate email
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_create(&payload)?;

    let customer = customer::create(&state.pool, payload)
        .await
        .map_err(map_conflict)?;

    tracing::info!(id = customer.id, "Customer created");
    Ok(Json(customer))
}

/// PATCH /customers/:id - partial merge
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    validate_update(&payload)?;

    let customer = customer::update(&state.pool, id, payload)
        .await
        .map_err(map_conflict)?;
    Ok(Json(customer))
}

/// DELETE /customers/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = customer::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::CustomerNotFound,
            format!("Customer {id} not found"),
        ));
    }

    tracing::info!(id, "Customer deleted");
    Ok(Json(DeleteResponse::new(format!(
        "Customer {id} deleted"
    ))))
}
