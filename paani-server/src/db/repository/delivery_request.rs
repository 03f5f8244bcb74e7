//! Delivery Request Repository
//!
//! Status values are stored as lowercase snake strings (`pending`,
//! `pending_confirmation`, ...), matching the wire format.
//!
//! Lookups that filter by customer match `customer_id` both as INTEGER and as
//! its TEXT form: rows imported from the legacy system stored the reference as
//! a string, and SQLite column affinities do not rewrite them.

use super::{RepoError, RepoResult};
use crate::db::models::{DeliveryRequest, DeliveryRequestCreate, DeliveryRequestUpdate, DeliveryStatus};
use crate::utils::{ids, time};
use sqlx::SqlitePool;

const REQUEST_SELECT: &str = "SELECT id, customer_id, customer_name, address, cans, order_details, priority, status, requested_at, scheduled_for, delivered_at, completed_at, internal_notes, created_at, updated_at FROM delivery_request";

const ACTIVE_STATUSES: &str = "('pending', 'pending_confirmation', 'processing')";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DeliveryRequest>> {
    let sql = format!("{REQUEST_SELECT} ORDER BY requested_at DESC");
    let rows = sqlx::query_as::<_, DeliveryRequest>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DeliveryRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, DeliveryRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active requests (pending / pending_confirmation / processing) for one customer.
pub async fn find_active_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<DeliveryRequest>> {
    let sql = format!(
        "{REQUEST_SELECT} WHERE (customer_id = ?1 OR customer_id = CAST(?1 AS TEXT)) AND status IN {ACTIVE_STATUSES} ORDER BY requested_at DESC"
    );
    let rows = sqlx::query_as::<_, DeliveryRequest>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_active_for_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM delivery_request WHERE (customer_id = ?1 OR customer_id = CAST(?1 AS TEXT)) AND status IN {ACTIVE_STATUSES}"
    );
    let n: i64 = sqlx::query_scalar(&sql)
        .bind(customer_id)
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Delivered requests for one customer (billing stats input).
pub async fn find_delivered_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<DeliveryRequest>> {
    let sql = format!(
        "{REQUEST_SELECT} WHERE (customer_id = ?1 OR customer_id = CAST(?1 AS TEXT)) AND status = 'delivered' ORDER BY delivered_at DESC"
    );
    let rows = sqlx::query_as::<_, DeliveryRequest>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a new request. Status starts as `pending`; the customer snapshot
/// fields are supplied by the caller after loading the customer record.
pub async fn create(
    pool: &SqlitePool,
    data: DeliveryRequestCreate,
    customer_name: &str,
    address: &str,
) -> RepoResult<DeliveryRequest> {
    let now = time::now_millis();
    let id = ids::snowflake_id();
    sqlx::query(
        "INSERT INTO delivery_request (id, customer_id, customer_name, address, cans, order_details, priority, status, requested_at, scheduled_for, internal_notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8, ?9, ?10, ?8, ?8)",
    )
    .bind(id)
    .bind(data.customer_id)
    .bind(customer_name)
    .bind(address)
    .bind(data.cans)
    .bind(&data.order_details)
    .bind(data.priority)
    .bind(now)
    .bind(data.scheduled_for)
    .bind(&data.internal_notes)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create delivery request".into()))
}

/// Partial field update. Never touches requested_at or status.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: DeliveryRequestUpdate,
) -> RepoResult<DeliveryRequest> {
    let now = time::now_millis();
    let rows = sqlx::query(
        "UPDATE delivery_request SET cans = COALESCE(?1, cans), order_details = COALESCE(?2, order_details), priority = COALESCE(?3, priority), scheduled_for = COALESCE(?4, scheduled_for), internal_notes = COALESCE(?5, internal_notes), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.cans)
    .bind(&data.order_details)
    .bind(data.priority)
    .bind(data.scheduled_for)
    .bind(&data.internal_notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Delivery request {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Delivery request {id} not found")))
}

/// Apply a status change as one atomic row write.
///
/// `delivered_at`/`completed_at` are stamped only when `stamp_delivered` is
/// set (the transition into `delivered`); they are never rewritten afterward.
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: DeliveryStatus,
    stamp_delivered: Option<i64>,
) -> RepoResult<DeliveryRequest> {
    let now = time::now_millis();
    let rows = sqlx::query(
        "UPDATE delivery_request SET status = ?1, delivered_at = COALESCE(?2, delivered_at), completed_at = COALESCE(?2, completed_at), updated_at = ?3 WHERE id = ?4",
    )
    .bind(status)
    .bind(stamp_delivered)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Delivery request {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Delivery request {id} not found")))
}
