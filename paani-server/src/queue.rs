//! Queue Ranking Module
//!
//! Two deliberately different orderings over the same request collection:
//!
//! - **Admin** is a monitoring list: grouped by status, urgent first inside the
//!   active groups, then most recent first.
//! - **Staff** is a work queue: active requests only, urgent always first,
//!   otherwise oldest first (FIFO fairness).
//!
//! Both are total orders for fixed inputs. The admin search predicate is
//! applied before ranking.

use std::cmp::Ordering;

use crate::db::models::{DeliveryRequest, DeliveryStatus, Priority};

/// Which ordering contract to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    Admin,
    Staff,
}

/// Status group rank for the admin view. Lower sorts first.
fn status_group(status: DeliveryStatus) -> u8 {
    match status {
        DeliveryStatus::PendingConfirmation => 0,
        DeliveryStatus::Pending => 1,
        DeliveryStatus::Processing => 2,
        DeliveryStatus::Delivered => 3,
        DeliveryStatus::Cancelled => 4,
    }
}

/// Urgent before normal. Lower sorts first.
fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Urgent => 0,
        Priority::Normal => 1,
    }
}

fn admin_cmp(a: &DeliveryRequest, b: &DeliveryRequest) -> Ordering {
    let group = status_group(a.status).cmp(&status_group(b.status));
    if group != Ordering::Equal {
        return group;
    }
    // Priority only separates requests inside the active groups; delivered and
    // cancelled history is purely recency-ordered.
    if a.status.is_active() {
        let prio = priority_rank(a.priority).cmp(&priority_rank(b.priority));
        if prio != Ordering::Equal {
            return prio;
        }
    }
    // Most recent first
    b.requested_at.cmp(&a.requested_at)
}

fn staff_cmp(a: &DeliveryRequest, b: &DeliveryRequest) -> Ordering {
    let prio = priority_rank(a.priority).cmp(&priority_rank(b.priority));
    if prio != Ordering::Equal {
        return prio;
    }
    // Oldest first
    a.requested_at.cmp(&b.requested_at)
}

/// Statuses shown on the staff queue
fn in_staff_queue(status: DeliveryStatus) -> bool {
    matches!(
        status,
        DeliveryStatus::Pending | DeliveryStatus::PendingConfirmation
    )
}

/// Order a request collection for display.
///
/// Staff mode filters down to the work queue statuses; admin mode keeps
/// everything.
pub fn rank(mut requests: Vec<DeliveryRequest>, mode: QueueMode) -> Vec<DeliveryRequest> {
    match mode {
        QueueMode::Admin => {
            requests.sort_by(admin_cmp);
        }
        QueueMode::Staff => {
            requests.retain(|r| in_staff_queue(r.status));
            requests.sort_by(staff_cmp);
        }
    }
    requests
}

/// Case-insensitive substring search over a request.
///
/// Customer name is the primary field; address, status and priority are
/// secondary conveniences. All are OR'd into one predicate.
pub fn matches_search(request: &DeliveryRequest, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    request.customer_name.to_lowercase().contains(&needle)
        || request.address.to_lowercase().contains(&needle)
        || request.status.as_str().contains(&needle)
        || request.priority.as_str().contains(&needle)
}

/// Apply the search predicate, then the ranking for `mode`.
pub fn filter_and_rank(
    requests: Vec<DeliveryRequest>,
    mode: QueueMode,
    term: Option<&str>,
) -> Vec<DeliveryRequest> {
    let filtered = match term {
        Some(t) if !t.trim().is_empty() => requests
            .into_iter()
            .filter(|r| matches_search(r, t))
            .collect(),
        _ => requests,
    };
    rank(filtered, mode)
}
