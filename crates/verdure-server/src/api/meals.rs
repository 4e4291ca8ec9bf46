//! Meal recommendations from the user's cart contents.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use verdure_core::DietaryPrefs;
use verdure_recipes::{MealSuggestion, RecipesError};

use crate::identity::AuthUser;
use crate::middleware::RequestId;

use super::{record_api_log, ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_MEALS: u8 = 5;

#[derive(Debug, Deserialize)]
pub(super) struct MealRequest {
    #[serde(default)]
    cart_items: Vec<String>,
    #[serde(default)]
    dietary_prefs: Option<DietaryPrefs>,
}

#[derive(Debug, Serialize)]
pub(super) struct MealsData {
    meals: Vec<MealSuggestion>,
}

pub(super) async fn meal_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<MealRequest>,
) -> Result<Json<ApiResponse<MealsData>>, ApiError> {
    if request.cart_items.iter().all(|item| item.trim().is_empty()) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "cart_items must contain at least one ingredient",
        ));
    }

    let Some(recipes) = &state.recipes else {
        return Err(ApiError::new(
            req_id.0,
            "upstream_unavailable",
            "recipe search is not configured",
        ));
    };

    let found = recipes
        .find_by_ingredients(&request.cart_items, MAX_MEALS)
        .await
        .map_err(|e| map_recipes_error(req_id.0.clone(), &e))?;

    let mut meals: Vec<MealSuggestion> =
        found.into_iter().map(MealSuggestion::from_recipe).collect();
    if let Some(prefs) = request.dietary_prefs {
        meals.retain(|meal| matches_prefs(&meal.tags, prefs));
    }

    record_api_log(
        &state.pool,
        "meal-recommendations",
        Some(&user.uid),
        200,
        serde_json::json!({ "meals": meals.len() }),
    )
    .await;

    Ok(Json(ApiResponse {
        data: MealsData { meals },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_recipes_error(request_id: String, error: &RecipesError) -> ApiError {
    match error {
        RecipesError::RateLimited { .. } => {
            tracing::warn!(error = %error, "recipe API rate limited");
            ApiError::new(
                request_id,
                "rate_limited",
                "too many requests; wait a minute and try again",
            )
        }
        RecipesError::QuotaExhausted => {
            tracing::warn!("recipe API quota exhausted");
            ApiError::new(
                request_id,
                "upstream_unavailable",
                "recipe search quota is exhausted for today",
            )
        }
        other => {
            tracing::error!(error = %other, "recipe search failed");
            ApiError::new(
                request_id,
                "upstream_unavailable",
                "recipe search is unavailable",
            )
        }
    }
}

/// True when the meal's derived tags satisfy every requested preference
/// that the tag heuristic can actually express. Preferences with no tag
/// counterpart (low-carb, keto, paleo) are left to the client.
fn matches_prefs(tags: &[String], prefs: DietaryPrefs) -> bool {
    let requires = [
        (prefs.vegan, "vegan"),
        (prefs.gluten_free, "gluten-free"),
        (prefs.nut_free, "nut-free"),
        (prefs.dairy_free, "dairy-free"),
    ];
    requires
        .iter()
        .all(|(wanted, tag)| !wanted || tags.iter().any(|t| t == tag))
}
