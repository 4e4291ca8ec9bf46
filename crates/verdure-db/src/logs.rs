//! Database operations for the `api_logs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `api_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiLogRow {
    pub id: i64,
    pub endpoint: String,
    pub user_uid: Option<String>,
    pub status: i16,
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Records one API interaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_api_log(
    pool: &PgPool,
    endpoint: &str,
    user_uid: Option<&str>,
    status: i16,
    detail: &serde_json::Value,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO api_logs (endpoint, user_uid, status, detail) \
         VALUES ($1, $2, $3, $4::jsonb)",
    )
    .bind(endpoint)
    .bind(user_uid)
    .bind(status)
    .bind(detail)
    .execute(pool)
    .await?;

    Ok(())
}

/// Lists the most recent API log rows, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_api_logs(pool: &PgPool, limit: i64) -> Result<Vec<ApiLogRow>, DbError> {
    let rows = sqlx::query_as::<_, ApiLogRow>(
        "SELECT id, endpoint, user_uid, status, detail, created_at \
         FROM api_logs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Lists a single user's recent log rows, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_user_logs(
    pool: &PgPool,
    user_uid: &str,
    limit: i64,
) -> Result<Vec<ApiLogRow>, DbError> {
    let rows = sqlx::query_as::<_, ApiLogRow>(
        "SELECT id, endpoint, user_uid, status, detail, created_at \
         FROM api_logs \
         WHERE user_uid = $1 \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(user_uid)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
