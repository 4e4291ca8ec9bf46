//! Cart endpoints: add, list, summary, remove.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use verdure_core::CartItem;

use crate::identity::AuthUser;
use crate::middleware::RequestId;

use super::{map_db_error, record_api_log, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CartAddRequest {
    item: CartItemPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct CartItemPayload {
    name: String,
    price: f64,
    #[serde(default)]
    quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CartRemoveRequest {
    item_id: Uuid,
}

#[derive(Debug, Serialize)]
pub(super) struct CartData {
    items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartSummaryData {
    total_items: i64,
    total_price: f64,
    items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct CartMutationData {
    message: &'static str,
}

fn to_cart_item(row: verdure_db::CartItemRow) -> CartItem {
    CartItem {
        id: row.id,
        name: row.name,
        price: row.price,
        quantity: row.quantity,
        added_at: row.added_at,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(super) async fn add_to_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CartAddRequest>,
) -> Result<Json<ApiResponse<CartMutationData>>, ApiError> {
    let item = request.item;
    if item.name.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "item.name must not be empty",
        ));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "item.price must be a non-negative number",
        ));
    }
    let quantity = item.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "item.quantity must be at least 1",
        ));
    }

    verdure_db::add_cart_item(&state.pool, &user.uid, item.name.trim(), item.price, quantity)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    record_api_log(
        &state.pool,
        "cart/add",
        Some(&user.uid),
        200,
        serde_json::json!({ "name": item.name.trim(), "quantity": quantity }),
    )
    .await;

    Ok(Json(ApiResponse {
        data: CartMutationData {
            message: "Item added",
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<CartData>>, ApiError> {
    let rows = verdure_db::list_cart_items(&state.pool, &user.uid)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: CartData {
            items: rows.into_iter().map(to_cart_item).collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn cart_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<CartSummaryData>>, ApiError> {
    let rows = verdure_db::list_cart_items(&state.pool, &user.uid)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let items: Vec<CartItem> = rows.into_iter().map(to_cart_item).collect();
    let summary = summarize(&items);

    Ok(Json(ApiResponse {
        data: CartSummaryData {
            total_items: summary.0,
            total_price: summary.1,
            items,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CartRemoveRequest>,
) -> Result<Json<ApiResponse<CartMutationData>>, ApiError> {
    let removed = verdure_db::remove_cart_item(&state.pool, &user.uid, request.item_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if !removed {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no such item in this cart",
        ));
    }

    record_api_log(
        &state.pool,
        "cart/remove",
        Some(&user.uid),
        200,
        serde_json::json!({ "itemId": request.item_id }),
    )
    .await;

    Ok(Json(ApiResponse {
        data: CartMutationData {
            message: "Item removed",
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Sums line quantities and extended prices, with money-style rounding.
fn summarize(items: &[CartItem]) -> (i64, f64) {
    let total_items: i64 = items.iter().map(|item| i64::from(item.quantity)).sum();
    let total_price: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    (total_items, round2(total_price))
}
