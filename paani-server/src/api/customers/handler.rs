//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate, NotificationCreate, NotificationType};
use crate::db::repository::{customer, delivery_request, notification};
use crate::metrics;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_default_cans,
    validate_optional_text, validate_price_per_can, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/customers - all customers, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(state.pool()).await?;
    Ok(Json(customers))
}

/// POST /api/customers - create a customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    validate_required_text(&payload.name, "Name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "Address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "Phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "Notes", MAX_NOTE_LEN)?;
    validate_default_cans(payload.default_cans)?;
    validate_price_per_can(payload.price_per_can)?;

    let customer = customer::create(state.pool(), payload).await?;

    // Informational side effect; a failed append never fails the create
    let note = NotificationCreate::new(
        NotificationType::NewCustomer,
        format!("New customer registered: {}", customer.name),
        Some(customer.id),
    );
    if let Err(e) = notification::append(state.pool(), note).await {
        tracing::warn!(error = %e, customer_id = customer.id, "Failed to append newCustomer notification");
    }

    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/{id} - partial update
///
/// Does not touch the customer's historical delivery requests: the name and
/// address on those are creation-time snapshots.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "Name", MAX_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "Address", MAX_ADDRESS_LEN)?;
    }
    validate_optional_text(&payload.phone, "Phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.notes, "Notes", MAX_NOTE_LEN)?;
    if let Some(default_cans) = payload.default_cans {
        validate_default_cans(default_cans)?;
    }
    if let Some(price) = payload.price_per_can {
        validate_price_per_can(price)?;
    }

    let customer = customer::update(state.pool(), id, payload).await?;
    Ok(Json(customer))
}

/// GET /api/customers/{id}/stats - per-customer billing stats
pub async fn stats(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<metrics::CustomerStats>> {
    let customer = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;

    let delivered = delivery_request::find_delivered_for_customer(state.pool(), id).await?;
    Ok(Json(metrics::customer_stats(&customer, &delivered)))
}

/// GET /api/customers/{id}/active-requests - active request check
pub async fn active_requests(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<metrics::ActiveRequestsCheck>> {
    let active = delivery_request::find_active_for_customer(state.pool(), id).await?;
    Ok(Json(metrics::active_requests_check(active)))
}
