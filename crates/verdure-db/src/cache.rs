//! Read-through caches: vegetable image URLs and full catalog result sets.
//!
//! Both caches tolerate concurrent writers — values are derived
//! deterministically from their keys, so last write wins is safe.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// Looks up the cached image URL for a canonical vegetable key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_cached_image(pool: &PgPool, canonical_key: &str) -> Result<Option<String>, DbError> {
    let url = sqlx::query_scalar::<_, String>(
        "SELECT image_url FROM image_cache WHERE canonical_key = $1",
    )
    .bind(canonical_key)
    .fetch_optional(pool)
    .await?;

    Ok(url)
}

/// Writes (or overwrites) the cached image URL for a canonical key.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn store_cached_image(
    pool: &PgPool,
    canonical_key: &str,
    image_url: &str,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO image_cache (canonical_key, image_url) \
         VALUES ($1, $2) \
         ON CONFLICT (canonical_key) DO UPDATE SET \
             image_url  = EXCLUDED.image_url, \
             fetched_at = NOW()",
    )
    .bind(canonical_key)
    .bind(image_url)
    .execute(pool)
    .await?;

    Ok(())
}

/// A row from the `catalog_cache` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogCacheRow {
    pub cache_key: String,
    pub payload: serde_json::Value,
    pub refreshed_at: DateTime<Utc>,
}

/// Fetches the last successfully built result set for a catalog endpoint.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_catalog_cache(
    pool: &PgPool,
    cache_key: &str,
) -> Result<Option<CatalogCacheRow>, DbError> {
    let row = sqlx::query_as::<_, CatalogCacheRow>(
        "SELECT cache_key, payload, refreshed_at FROM catalog_cache WHERE cache_key = $1",
    )
    .bind(cache_key)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Replaces the cached result set for a catalog endpoint.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn store_catalog_cache(
    pool: &PgPool,
    cache_key: &str,
    payload: &serde_json::Value,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO catalog_cache (cache_key, payload) \
         VALUES ($1, $2::jsonb) \
         ON CONFLICT (cache_key) DO UPDATE SET \
             payload      = EXCLUDED.payload, \
             refreshed_at = NOW()",
    )
    .bind(cache_key)
    .bind(payload)
    .execute(pool)
    .await?;

    Ok(())
}
