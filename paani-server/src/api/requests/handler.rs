//! Delivery Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{
    DeliveryRequest, DeliveryRequestCreate, DeliveryRequestUpdate, DeliveryStatus,
    NotificationCreate, NotificationType,
};
use crate::db::repository::{customer, delivery_request, notification};
use crate::lifecycle::{self, Advance};
use crate::queue::{self, QueueMode};
use crate::utils::validation::{MAX_NOTE_LEN, validate_cans, validate_optional_text};
use crate::utils::{AppError, AppResult, time};

/// Query params for listing requests
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Ranking contract: admin | staff. Plain requested_at-descending list
    /// when absent.
    pub view: Option<String>,
    /// Admin search term
    pub q: Option<String>,
}

/// GET /api/delivery-requests - list, optionally filtered and ranked
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<DeliveryRequest>>> {
    let requests = delivery_request::find_all(state.pool()).await?;

    let mode = match query.view.as_deref() {
        None => return Ok(Json(requests)),
        Some("admin") => QueueMode::Admin,
        Some("staff") => QueueMode::Staff,
        Some(other) => {
            return Err(AppError::validation(format!(
                "Unknown view '{other}' (expected admin or staff)"
            )));
        }
    };

    Ok(Json(queue::filter_and_rank(
        requests,
        mode,
        query.q.as_deref(),
    )))
}

/// POST /api/delivery-requests - create a request
///
/// Rejected with 409 when the customer already has an active request. The
/// customer name/address are snapshotted onto the new record.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DeliveryRequestCreate>,
) -> AppResult<(StatusCode, Json<DeliveryRequest>)> {
    validate_cans(payload.cans)?;
    validate_optional_text(&payload.order_details, "Order details", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.internal_notes, "Internal notes", MAX_NOTE_LEN)?;

    let customer = customer::find_by_id(state.pool(), payload.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Customer {} not found", payload.customer_id))
        })?;

    let active = delivery_request::count_active_for_customer(state.pool(), customer.id).await?;
    if active > 0 {
        return Err(AppError::active_request_exists(format!(
            "Customer {} already has an active delivery request",
            customer.name
        )));
    }

    let request =
        delivery_request::create(state.pool(), payload, &customer.name, &customer.address).await?;

    let note = NotificationCreate::new(
        NotificationType::RequestCreated,
        format!("New delivery request for {} ({} cans)", request.customer_name, request.cans),
        Some(request.id),
    );
    if let Err(e) = notification::append(state.pool(), note).await {
        tracing::warn!(error = %e, request_id = request.id, "Failed to append requestCreated notification");
    }

    tracing::info!(
        request_id = request.id,
        customer_id = request.customer_id,
        cans = request.cans,
        priority = %request.priority.as_str(),
        "Delivery request created"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// PUT /api/delivery-requests/{id} - partial field update (never status)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeliveryRequestUpdate>,
) -> AppResult<Json<DeliveryRequest>> {
    if let Some(cans) = payload.cans {
        validate_cans(cans)?;
    }
    validate_optional_text(&payload.order_details, "Order details", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.internal_notes, "Internal notes", MAX_NOTE_LEN)?;

    let request = delivery_request::update(state.pool(), id, payload).await?;
    Ok(Json(request))
}

/// Status change payload
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: DeliveryStatus,
}

/// PUT /api/delivery-requests/{id}/status - advance through the lifecycle
///
/// Entering `delivered` stamps delivered_at/completed_at once; re-sending the
/// current status is a no-op success and never re-stamps.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<DeliveryRequest>> {
    advance(&state, id, payload.status).await.map(Json)
}

/// POST /api/delivery-requests/{id}/cancel - cancel shorthand
///
/// Same operation as advancing to `cancelled`; only legal from non-terminal
/// states, and irreversible.
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeliveryRequest>> {
    advance(&state, id, DeliveryStatus::Cancelled).await.map(Json)
}

/// Shared advanceStatus implementation.
async fn advance(
    state: &ServerState,
    id: i64,
    target: DeliveryStatus,
) -> AppResult<DeliveryRequest> {
    let current = delivery_request::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Delivery request {id} not found")))?;

    match lifecycle::check_advance(current.status, target)? {
        // Same status: succeed without writing (keeps client retries cheap
        // and never re-stamps delivery timestamps)
        Advance::NoOp => return Ok(current),
        Advance::Apply => {}
    }

    let stamp = (target == DeliveryStatus::Delivered).then(time::now_millis);
    let updated = delivery_request::set_status(state.pool(), id, target, stamp).await?;

    if target == DeliveryStatus::Cancelled {
        let note = NotificationCreate::new(
            NotificationType::RequestCancelled,
            format!("Delivery request for {} was cancelled", updated.customer_name),
            Some(updated.id),
        );
        if let Err(e) = notification::append(state.pool(), note).await {
            tracing::warn!(error = %e, request_id = updated.id, "Failed to append requestCancelled notification");
        }
    }

    tracing::info!(
        request_id = id,
        from = %current.status,
        to = %target,
        "Delivery request status advanced"
    );

    Ok(updated)
}
