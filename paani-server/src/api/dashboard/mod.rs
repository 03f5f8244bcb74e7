//! Dashboard API Module
//!
//! Aggregated operational metrics for the admin home screen.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard/metrics", get(handler::metrics))
}
