//! Delivery Request Model

use serde::{Deserialize, Serialize};

/// Delivery request status
///
/// `delivered` and `cancelled` are terminal. Transition rules live in
/// [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    PendingConfirmation,
    Processing,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    /// Active statuses count against the one-active-request-per-customer rule
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Pending | Self::PendingConfirmation | Self::Processing
        )
    }

    /// Terminal statuses permit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Wire string, as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingConfirmation => "pending_confirmation",
            Self::Processing => "processing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Delivery request entity
///
/// `customer_name` and `address` are snapshots taken from the customer record
/// at creation time; later customer edits do not propagate back here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub id: i64,

    pub customer_id: i64,

    /// Customer name snapshot
    pub customer_name: String,

    /// Delivery address snapshot
    pub address: String,

    /// Number of cans requested (>= 1)
    pub cans: i64,

    /// Special instructions from the customer
    pub order_details: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: DeliveryStatus,

    /// When the request was logged (Unix millis, immutable)
    pub requested_at: i64,

    /// Optional admin-scheduled delivery time
    pub scheduled_for: Option<i64>,

    /// Set iff status is delivered
    pub delivered_at: Option<i64>,

    /// Set iff status is delivered
    pub completed_at: Option<i64>,

    /// Internal notes for admin/staff
    pub internal_notes: Option<String>,

    pub created_at: i64,

    pub updated_at: i64,
}

/// Create delivery request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequestCreate {
    pub customer_id: i64,
    pub cans: i64,
    pub order_details: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub scheduled_for: Option<i64>,
    pub internal_notes: Option<String>,
}

/// Partial update payload — requested_at and status are deliberately absent:
/// the first is immutable, the second only moves through the lifecycle engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cans: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
}
