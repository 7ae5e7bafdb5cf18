//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`categories`] - category management
//! - [`customers`] - customer management
//! - [`products`] - product management (multipart image upload)
//! - [`orders`] - order placement and lookup

pub mod categories;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::AppState;

/// Confirmation payload for DELETE endpoints
#[derive(Debug, serde::Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            deleted: true,
            message: message.into(),
        }
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(customers::router())
        .merge(products::router())
        .merge(orders::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
