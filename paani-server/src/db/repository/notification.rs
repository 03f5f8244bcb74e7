//! Admin Notification Repository
//!
//! Append-only: rows are inserted by side effects of other operations and
//! only ever mutated to flip `is_read`.

use super::{RepoError, RepoResult};
use crate::db::models::{AdminNotification, NotificationCreate};
use crate::utils::{ids, time};
use sqlx::SqlitePool;

const NOTIFICATION_SELECT: &str =
    "SELECT id, type, message, related_doc_id, timestamp, is_read FROM admin_notification";

pub async fn append(pool: &SqlitePool, data: NotificationCreate) -> RepoResult<AdminNotification> {
    let now = time::now_millis();
    let id = ids::snowflake_id();
    sqlx::query(
        "INSERT INTO admin_notification (id, type, message, related_doc_id, timestamp, is_read) VALUES (?1, ?2, ?3, ?4, ?5, 0)",
    )
    .bind(id)
    .bind(data.kind)
    .bind(&data.message)
    .bind(data.related_doc_id)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to append notification".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminNotification>> {
    let sql = format!("{NOTIFICATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, AdminNotification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Newest first.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AdminNotification>> {
    let sql = format!("{NOTIFICATION_SELECT} ORDER BY timestamp DESC");
    let rows = sqlx::query_as::<_, AdminNotification>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<AdminNotification> {
    let rows = sqlx::query("UPDATE admin_notification SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Notification {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Notification {id} not found")))
}

/// Returns the number of notifications flipped to read.
pub async fn mark_all_read(pool: &SqlitePool) -> RepoResult<u64> {
    let rows = sqlx::query("UPDATE admin_notification SET is_read = 1 WHERE is_read = 0")
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
