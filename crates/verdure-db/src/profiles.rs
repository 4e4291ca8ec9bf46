//! Database operations for the `users` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `users` table.
///
/// `dietary_prefs` stays as raw JSON here; the server layer decodes it into
/// the typed preference struct so schema drift never breaks reads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub dietary_prefs: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creates the user row at signup, or refreshes `email` if it already
/// exists (re-signup after a provider-side email change).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_user(
    pool: &PgPool,
    uid: &str,
    email: &str,
    name: &str,
    avatar_url: &str,
) -> Result<ProfileRow, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "INSERT INTO users (uid, email, name, avatar_url) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (uid) DO UPDATE SET \
             email      = EXCLUDED.email, \
             updated_at = NOW() \
         RETURNING uid, email, name, avatar_url, dietary_prefs, created_at, updated_at",
    )
    .bind(uid)
    .bind(email)
    .bind(name)
    .bind(avatar_url)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetches a profile by uid; `None` when the user never signed up.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_profile(pool: &PgPool, uid: &str) -> Result<Option<ProfileRow>, DbError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT uid, email, name, avatar_url, dietary_prefs, created_at, updated_at \
         FROM users WHERE uid = $1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Partially updates a profile; `None` fields keep their current value.
///
/// Returns `false` when no row exists for `uid`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn update_profile(
    pool: &PgPool,
    uid: &str,
    name: Option<&str>,
    avatar_url: Option<&str>,
    dietary_prefs: Option<&serde_json::Value>,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE users SET \
             name          = COALESCE($2, name), \
             avatar_url    = COALESCE($3, avatar_url), \
             dietary_prefs = COALESCE($4, dietary_prefs), \
             updated_at    = NOW() \
         WHERE uid = $1",
    )
    .bind(uid)
    .bind(name)
    .bind(avatar_url)
    .bind(dietary_prefs)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
