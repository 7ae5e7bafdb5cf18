//! Product API module

mod handler;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::core::AppState;

/// Request body cap: image uploads up to 20MB plus form overhead
const MAX_BODY_SIZE: usize = 25 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(handler::list).post(handler::create))
        .route(
            "/products/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}
