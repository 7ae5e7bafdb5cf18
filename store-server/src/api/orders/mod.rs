//! Order API module

mod handler;

use axum::routing::get;
use axum::Router;

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handler::list).post(handler::create))
        .route(
            "/orders/{id}",
            get(handler::get_by_id).patch(handler::update_status),
        )
}
