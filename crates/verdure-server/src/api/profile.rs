//! Profile read/update endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use verdure_core::{DietaryPrefs, UserProfile};

use crate::identity::AuthUser;
use crate::middleware::RequestId;

use super::{map_db_error, record_api_log, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateProfileRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    dietary_prefs: Option<DietaryPrefs>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateProfileData {
    message: &'static str,
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    if uid != user.uid {
        return Err(ApiError::new(
            req_id.0,
            "forbidden",
            "profiles are only visible to their owner",
        ));
    }

    let row = verdure_db::get_profile(&state.pool, &uid)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let profile = match row {
        Some(row) => UserProfile {
            uid: row.uid,
            email: Some(row.email),
            name: row.name,
            avatar_url: row.avatar_url,
            dietary_prefs: decode_prefs(row.dietary_prefs),
        },
        // Authenticated but never signed up here: serve defaults rather
        // than a 404 so the storefront can always render the page.
        None => UserProfile::fallback(&uid, user.email.as_deref()),
    };

    Ok(Json(ApiResponse {
        data: profile,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn update_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UpdateProfileData>>, ApiError> {
    let prefs_value = request
        .dietary_prefs
        .map(|prefs| serde_json::to_value(prefs).unwrap_or_default());

    let updated = verdure_db::update_profile(
        &state.pool,
        &user.uid,
        request.name.as_deref(),
        request.avatar_url.as_deref(),
        prefs_value.as_ref(),
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    if !updated {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            "no profile exists for this user; sign up first",
        ));
    }

    record_api_log(
        &state.pool,
        "profile/update",
        Some(&user.uid),
        200,
        serde_json::json!({
            "changed": {
                "name": request.name.is_some(),
                "avatarUrl": request.avatar_url.is_some(),
                "dietaryPrefs": prefs_value.is_some(),
            }
        }),
    )
    .await;

    Ok(Json(ApiResponse {
        data: UpdateProfileData {
            message: "Profile updated",
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Decodes stored preference JSON, falling back to defaults on any drift.
fn decode_prefs(value: serde_json::Value) -> DietaryPrefs {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_deserializes_camel_case_fields() {
        let request: UpdateProfileRequest = serde_json::from_str(
            r#"{
                "name": "Ada",
                "avatarUrl": "https://images.example.com/ada.png",
                "dietaryPrefs": { "glutenFree": true }
            }"#,
        )
        .expect("deserialize");
        assert_eq!(request.name.as_deref(), Some("Ada"));
        assert!(request.avatar_url.is_some());
        assert!(request.dietary_prefs.expect("prefs present").gluten_free);
    }

    #[test]
    fn decode_prefs_survives_unknown_shapes() {
        assert_eq!(
            decode_prefs(serde_json::json!("not an object")),
            DietaryPrefs::default()
        );
        assert!(decode_prefs(serde_json::json!({ "vegan": true })).vegan);
    }
}
