//! Dashboard API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{customer, delivery_request};
use crate::metrics::{self, DashboardMetrics};
use crate::utils::{AppResult, time};

/// GET /api/dashboard/metrics - today's operational snapshot
///
/// "Today" is resolved in the configured business timezone, not UTC.
pub async fn metrics(State(state): State<ServerState>) -> AppResult<Json<DashboardMetrics>> {
    let total_customers = customer::count(state.pool()).await?;
    let requests = delivery_request::find_all(state.pool()).await?;
    let (day_start, day_end) = time::today_bounds(state.config.timezone);

    Ok(Json(metrics::dashboard(
        total_customers,
        &requests,
        day_start,
        day_end,
    )))
}
