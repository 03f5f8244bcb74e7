//! Metrics Aggregator
//!
//! Read-only derived statistics over snapshots of the request/customer
//! collections. Pure functions, no stored state: callers re-query on their
//! own cadence and pass the current snapshot in. Empty input is always valid
//! and yields zeroed metrics.

use serde::Serialize;

use crate::db::models::{Customer, DeliveryRequest, DeliveryStatus};

/// Dashboard counters
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_customers: i64,
    /// pending + pending_confirmation
    pub pending_requests: i64,
    pub deliveries_today: i64,
    pub total_cans_today: i64,
}

/// Per-customer billing stats
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_deliveries: i64,
    pub total_cans_received: i64,
    /// total_cans_received * price_per_can
    pub total_price: i64,
    pub price_per_can: i64,
}

/// Active-request check result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRequestsCheck {
    pub has_active_requests: bool,
    pub active_requests_count: i64,
    pub active_requests: Vec<DeliveryRequest>,
}

/// Whether a delivery counts toward "today", given the half-open local-day
/// bounds `[day_start, day_end)` in millis.
fn delivered_today(request: &DeliveryRequest, day_start: i64, day_end: i64) -> bool {
    request.status == DeliveryStatus::Delivered
        && request
            .delivered_at
            .is_some_and(|at| at >= day_start && at < day_end)
}

/// Compute the dashboard counters from a full request snapshot.
pub fn dashboard(
    total_customers: i64,
    requests: &[DeliveryRequest],
    day_start: i64,
    day_end: i64,
) -> DashboardMetrics {
    let pending_requests = requests
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                DeliveryStatus::Pending | DeliveryStatus::PendingConfirmation
            )
        })
        .count() as i64;

    let today: Vec<&DeliveryRequest> = requests
        .iter()
        .filter(|r| delivered_today(r, day_start, day_end))
        .collect();

    DashboardMetrics {
        total_customers,
        pending_requests,
        deliveries_today: today.len() as i64,
        total_cans_today: today.iter().map(|r| r.cans).sum(),
    }
}

/// Billing stats from a customer's delivered requests.
///
/// The caller supplies the delivered set for that customer; ids are matched at
/// the storage seam (including legacy string-typed references), so this stays
/// a pure fold over cans.
pub fn customer_stats(customer: &Customer, delivered: &[DeliveryRequest]) -> CustomerStats {
    let total_cans_received: i64 = delivered.iter().map(|r| r.cans).sum();
    CustomerStats {
        total_deliveries: delivered.len() as i64,
        total_cans_received,
        total_price: total_cans_received * customer.price_per_can,
        price_per_can: customer.price_per_can,
    }
}

/// Active-request check from a customer's active requests.
pub fn active_requests_check(active: Vec<DeliveryRequest>) -> ActiveRequestsCheck {
    ActiveRequestsCheck {
        has_active_requests: !active.is_empty(),
        active_requests_count: active.len() as i64,
        active_requests: active,
    }
}
