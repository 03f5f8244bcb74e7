//! Notification API Module
//!
//! Admin-facing event feed with read-state management.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/notifications",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/{id}/read", put(handler::mark_read))
            .route("/read-all", put(handler::mark_all_read)),
    )
}
