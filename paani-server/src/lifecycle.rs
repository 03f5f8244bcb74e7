//! Request Lifecycle Engine
//!
//! Pure validation of status transitions. The state machine:
//!
//! ```text
//! pending              -> processing | pending_confirmation | cancelled
//! pending_confirmation -> processing | delivered | cancelled
//! processing           -> delivered | cancelled
//! delivered, cancelled -> (terminal)
//! ```
//!
//! Re-requesting the status a record is already in is a no-op success rather
//! than an error, so clients can retry a transition without first re-reading
//! the record.

use crate::db::models::DeliveryStatus;
use crate::utils::{AppError, AppResult};

/// Outcome of a transition check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Legal transition, apply it
    Apply,
    /// Target equals current status, nothing to write
    NoOp,
}

/// Whether `from -> to` appears in the transition table.
///
/// Same-state pairs are not part of the table; they are handled as no-ops by
/// [`check_advance`].
pub fn is_valid_transition(from: DeliveryStatus, to: DeliveryStatus) -> bool {
    use DeliveryStatus::*;
    match (from, to) {
        (Pending, Processing) | (Pending, PendingConfirmation) => true,
        (PendingConfirmation, Processing) | (PendingConfirmation, Delivered) => true,
        (Processing, Delivered) => true,
        (Pending, Cancelled) | (PendingConfirmation, Cancelled) | (Processing, Cancelled) => true,
        _ => false,
    }
}

/// Validate an `advanceStatus` call against the current status.
pub fn check_advance(from: DeliveryStatus, to: DeliveryStatus) -> AppResult<Advance> {
    if from == to {
        return Ok(Advance::NoOp);
    }
    if is_valid_transition(from, to) {
        return Ok(Advance::Apply);
    }
    if from.is_terminal() {
        return Err(AppError::invalid_transition(format!(
            "Request is already {from} and cannot change"
        )));
    }
    Err(AppError::invalid_transition(format!(
        "Cannot move a request from {from} to {to}"
    )))
}

/// All statuses, for exhaustive checks.
pub const ALL_STATUSES: [DeliveryStatus; 5] = [
    DeliveryStatus::Pending,
    DeliveryStatus::PendingConfirmation,
    DeliveryStatus::Processing,
    DeliveryStatus::Delivered,
    DeliveryStatus::Cancelled,
];
