//! The two catalog endpoints and the orchestration around the curation
//! engine: fetch candidates, curate, enrich with cached images and
//! synthetic prices, persist the result set, serve stale on empty.

use axum::{extract::State, Extension, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};
use verdure_core::{CatalogItem, DailyOffer};
use verdure_produce::{curate, Candidate, CurationProfile};

use crate::middleware::RequestId;

use super::{record_api_log, ApiError, ApiResponse, AppState, ResponseMeta};

pub(crate) const GROCERY_CACHE_KEY: &str = "grocery-items";
pub(crate) const OFFERS_CACHE_KEY: &str = "daily-offers";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GroceryItemsData {
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DailyOffersData {
    pub offers: Vec<DailyOffer>,
}

/// The one hard failure a catalog build can produce: nothing survived
/// selection even after fallback padding.
#[derive(Debug, thiserror::Error)]
#[error("no items produced after fallback padding")]
pub(crate) struct EmptyCatalog;

pub(super) async fn grocery_items(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<GroceryItemsData>>, ApiError> {
    match build_grocery_items(&state).await {
        Ok(items) => {
            record_api_log(
                &state.pool,
                GROCERY_CACHE_KEY,
                None,
                200,
                serde_json::json!({ "count": items.len() }),
            )
            .await;
            Ok(Json(ApiResponse {
                data: GroceryItemsData { items },
                meta: ResponseMeta::new(req_id.0),
            }))
        }
        Err(EmptyCatalog) => {
            serve_stale::<GroceryItemsData>(&state, GROCERY_CACHE_KEY, req_id).await
        }
    }
}

pub(super) async fn daily_offers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DailyOffersData>>, ApiError> {
    match build_daily_offers(&state).await {
        Ok(offers) => {
            record_api_log(
                &state.pool,
                OFFERS_CACHE_KEY,
                None,
                200,
                serde_json::json!({ "count": offers.len() }),
            )
            .await;
            Ok(Json(ApiResponse {
                data: DailyOffersData { offers },
                meta: ResponseMeta::new(req_id.0),
            }))
        }
        Err(EmptyCatalog) => serve_stale::<DailyOffersData>(&state, OFFERS_CACHE_KEY, req_id).await,
    }
}

/// Builds the 20-item grocery catalog and refreshes its cache.
///
/// Also called by the background refresh job, so it takes the shared state
/// rather than request parts.
pub(crate) async fn build_grocery_items(
    state: &AppState,
) -> Result<Vec<CatalogItem>, EmptyCatalog> {
    let profile = CurationProfile::grocery_items();
    let candidates = fetch_candidates_degraded(state).await;
    let selection = {
        let mut rng = rand::rng();
        curate(&profile, candidates, &mut rng)
    };
    tracing::debug!(
        accepted = selection.accepted.len(),
        rejected = selection.rejected.len(),
        "grocery catalog curated"
    );
    if selection.accepted.is_empty() {
        return Err(EmptyCatalog);
    }

    let mut items = Vec::with_capacity(selection.accepted.len());
    for entry in selection.accepted {
        let image = image_for(state, &entry.canonical_key).await;
        items.push(CatalogItem {
            name: entry.name,
            category: "vegetable".to_string(),
            tags: entry.tags,
            price: synth_price(1.0, 5.0),
            image,
            veg_type: entry.veg_type,
        });
    }

    store_catalog_cache(
        state,
        GROCERY_CACHE_KEY,
        &GroceryItemsData {
            items: items.clone(),
        },
    )
    .await;
    Ok(items)
}

/// Builds the 10-offer daily deals list and refreshes its cache.
pub(crate) async fn build_daily_offers(state: &AppState) -> Result<Vec<DailyOffer>, EmptyCatalog> {
    let profile = CurationProfile::daily_offers();
    let candidates = fetch_candidates_degraded(state).await;
    let selection = {
        let mut rng = rand::rng();
        curate(&profile, candidates, &mut rng)
    };
    tracing::debug!(
        accepted = selection.accepted.len(),
        rejected = selection.rejected.len(),
        "daily offers curated"
    );
    if selection.accepted.is_empty() {
        return Err(EmptyCatalog);
    }

    let offers = selection
        .accepted
        .into_iter()
        .map(|entry| DailyOffer {
            name: entry.name,
            original: synth_price(2.0, 5.0),
            sale: synth_price(1.0, 3.0),
            tags: entry.tags,
        })
        .collect::<Vec<_>>();

    store_catalog_cache(
        state,
        OFFERS_CACHE_KEY,
        &DailyOffersData {
            offers: offers.clone(),
        },
    )
    .await;
    Ok(offers)
}

/// Fetches one page of candidates, degrading any upstream failure to an
/// empty list so the pipeline continues on the fallback pool alone.
async fn fetch_candidates_degraded(state: &AppState) -> Vec<Candidate> {
    match state.food.fetch_candidates(state.settings.page_size).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(error = %e, "candidate fetch failed; continuing with fallback pool only");
            Vec::new()
        }
    }
}

/// Read-through image lookup for one canonical key.
///
/// Cache hit wins; on miss the image search runs once and whatever comes
/// out — first hit or placeholder — is written back. Every failure along
/// the way degrades to the placeholder; enrichment never fails a build.
async fn image_for(state: &AppState, canonical_key: &str) -> String {
    match verdure_db::get_cached_image(&state.pool, canonical_key).await {
        Ok(Some(url)) => return url,
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, key = canonical_key, "image cache lookup failed");
        }
    }

    let placeholder = &state.settings.placeholder_image_url;
    let Some(images) = &state.images else {
        return placeholder.clone();
    };

    let url = match images.search_photo(canonical_key).await {
        Ok(Some(url)) => url,
        Ok(None) => placeholder.clone(),
        Err(e) => {
            tracing::warn!(error = %e, key = canonical_key, "image search failed");
            placeholder.clone()
        }
    };

    if let Err(e) = verdure_db::store_cached_image(&state.pool, canonical_key, &url).await {
        tracing::warn!(error = %e, key = canonical_key, "image cache write failed");
    }

    url
}

/// Persists a freshly built result set; a cache write failure is logged and
/// otherwise ignored.
async fn store_catalog_cache<T: Serialize>(state: &AppState, cache_key: &str, data: &T) {
    match serde_json::to_value(data) {
        Ok(payload) => {
            if let Err(e) = verdure_db::store_catalog_cache(&state.pool, cache_key, &payload).await
            {
                tracing::warn!(error = %e, cache_key, "catalog cache write failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, cache_key, "catalog payload serialization failed"),
    }
}

/// Serves the last cached result set after an empty build, or surfaces the
/// `no_items` failure when there is nothing to fall back to.
async fn serve_stale<T: serde::de::DeserializeOwned + Serialize>(
    state: &AppState,
    cache_key: &str,
    req_id: RequestId,
) -> Result<Json<ApiResponse<T>>, ApiError> {
    match verdure_db::get_catalog_cache(&state.pool, cache_key).await {
        Ok(Some(row)) => match serde_json::from_value::<T>(row.payload) {
            Ok(data) => {
                tracing::warn!(cache_key, "serving stale catalog after empty build");
                record_api_log(
                    &state.pool,
                    cache_key,
                    None,
                    200,
                    serde_json::json!({ "stale": true }),
                )
                .await;
                Ok(Json(ApiResponse {
                    data,
                    meta: ResponseMeta::new(req_id.0),
                }))
            }
            Err(e) => {
                tracing::error!(error = %e, cache_key, "cached catalog payload is corrupt");
                Err(no_items_error(state, cache_key, req_id).await)
            }
        },
        Ok(None) => Err(no_items_error(state, cache_key, req_id).await),
        Err(e) => {
            tracing::error!(error = %e, cache_key, "catalog cache read failed");
            Err(no_items_error(state, cache_key, req_id).await)
        }
    }
}

async fn no_items_error(state: &AppState, cache_key: &str, req_id: RequestId) -> ApiError {
    record_api_log(
        &state.pool,
        cache_key,
        None,
        502,
        serde_json::json!({ "error": "no_items" }),
    )
    .await;
    ApiError::new(
        req_id.0,
        "no_items",
        "no items could be produced from live data or the fallback pool",
    )
}

/// Uniform synthetic price in `[low, high]`, rounded to two decimals.
fn synth_price(low: f64, high: f64) -> f64 {
    let raw = rand::rng().random_range(low..=high);
    round2(raw)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
