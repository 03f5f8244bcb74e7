//! Delivery Request API Module
//!
//! All status mutations go through the lifecycle engine; the plain update
//! route never changes status.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Delivery request router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/delivery-requests", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
}
