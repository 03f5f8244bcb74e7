//! Admin Notification Model
//!
//! Append-only log, informational only. Created as a side effect of other
//! operations; mutated only to flip `is_read`; never deleted.

use serde::{Deserialize, Serialize};

/// Notification type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub enum NotificationType {
    RequestCancelled,
    NewCustomer,
    RequestCreated,
    Generic,
}

/// Admin notification entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminNotification {
    pub id: i64,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: NotificationType,

    pub message: String,

    /// Related record (cancelled request id, new customer id, ...)
    pub related_doc_id: Option<i64>,

    /// Unix timestamp millis
    pub timestamp: i64,

    pub is_read: bool,
}

/// Append notification payload
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub kind: NotificationType,
    pub message: String,
    pub related_doc_id: Option<i64>,
}

impl NotificationCreate {
    pub fn new(
        kind: NotificationType,
        message: impl Into<String>,
        related_doc_id: Option<i64>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            related_doc_id,
        }
    }
}
