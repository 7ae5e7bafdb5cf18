//! Order API Handlers
//!
//! Order placement is all-or-nothing: the repository runs the whole
//! workflow in one transaction and a stock failure surfaces as a 400
//! naming the offending product.

use axum::extract::{Path, State};
use axum::Json;

use crate::core::AppState;
use crate::db::repository::order;
use shared::models::{Order, OrderCreate, OrderStatusUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /orders - all orders with nested customer/items/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /orders/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })?;
    Ok(Json(order))
}

/// POST /orders - place an order
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let order = order::create(&state.pool, payload).await?;

    tracing::info!(
        id = order.id,
        customer_id = order.customer_id,
        total = order.total,
        items = order.items.len(),
        "Order placed"
    );
    Ok(Json(order))
}

/// PATCH /orders/:id - status transition only
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = order::update_status(&state.pool, id, payload.status).await?;
    tracing::info!(id, status = ?payload.status, "Order status updated");
    Ok(Json(order))
}
