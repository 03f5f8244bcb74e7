//! Customer Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::utils::{ids, time};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, address, default_cans, price_per_can, notes, created_at, updated_at FROM customer";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    let now = time::now_millis();
    let id = ids::snowflake_id();
    sqlx::query(
        "INSERT INTO customer (id, name, phone, address, default_cans, price_per_can, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(&data.phone)
    .bind(data.address.trim())
    .bind(data.default_cans)
    .bind(data.price_per_can)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    let now = time::now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), address = COALESCE(?3, address), default_cans = COALESCE(?4, default_cans), price_per_can = COALESCE(?5, price_per_can), notes = COALESCE(?6, notes), updated_at = ?7 WHERE id = ?8",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&data.phone)
    .bind(data.address.as_deref().map(str::trim))
    .bind(data.default_cans)
    .bind(data.price_per_can)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}
