//! Database operations for the `cart_items` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// One line of a user's cart.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItemRow {
    pub id: Uuid,
    pub user_uid: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Adds an item to the cart.
///
/// Re-adding an item the user already has bumps its quantity instead of
/// creating a second line (conflict on `(user_uid, name)`).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn add_cart_item(
    pool: &PgPool,
    user_uid: &str,
    name: &str,
    price: f64,
    quantity: i32,
) -> Result<CartItemRow, DbError> {
    let row = sqlx::query_as::<_, CartItemRow>(
        "INSERT INTO cart_items (user_uid, name, price, quantity) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (user_uid, name) DO UPDATE SET \
             quantity = cart_items.quantity + EXCLUDED.quantity, \
             price    = EXCLUDED.price \
         RETURNING id, user_uid, name, price, quantity, added_at",
    )
    .bind(user_uid)
    .bind(name)
    .bind(price)
    .bind(quantity)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Lists the user's cart, oldest line first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_cart_items(pool: &PgPool, user_uid: &str) -> Result<Vec<CartItemRow>, DbError> {
    let rows = sqlx::query_as::<_, CartItemRow>(
        "SELECT id, user_uid, name, price, quantity, added_at \
         FROM cart_items WHERE user_uid = $1 \
         ORDER BY added_at",
    )
    .bind(user_uid)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Removes one cart line by id, scoped to the owner.
///
/// Returns `false` when the line does not exist or belongs to another user.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn remove_cart_item(
    pool: &PgPool,
    user_uid: &str,
    item_id: Uuid,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_uid = $2")
        .bind(item_id)
        .bind(user_uid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
