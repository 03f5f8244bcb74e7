//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{AdminNotification, NotificationCreate, NotificationType};
use crate::db::repository::notification;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};

/// GET /api/notifications - newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminNotification>>> {
    let notifications = notification::find_all(state.pool()).await?;
    Ok(Json(notifications))
}

/// Manual append payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreateRequest {
    /// Defaults to `generic` when the admin does not pick a type
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    pub message: String,
    pub related_doc_id: Option<i64>,
}

/// POST /api/notifications - manual admin append
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationCreateRequest>,
) -> AppResult<(StatusCode, Json<AdminNotification>)> {
    validate_required_text(&payload.message, "Message", MAX_NOTE_LEN)?;

    let note = NotificationCreate::new(
        payload.kind.unwrap_or(NotificationType::Generic),
        payload.message,
        payload.related_doc_id,
    );
    let created = notification::append(state.pool(), note).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/notifications/{id}/read - mark one notification read
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AdminNotification>> {
    let updated = notification::mark_read(state.pool(), id).await?;
    Ok(Json(updated))
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// PUT /api/notifications/read-all - mark every notification read
pub async fn mark_all_read(
    State(state): State<ServerState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = notification::mark_all_read(state.pool()).await?;
    tracing::info!(updated, "Marked all notifications read");
    Ok(Json(MarkAllReadResponse { updated }))
}
