//! Signup/login endpoints.
//!
//! Token issuance and password handling live entirely with the identity
//! provider; by the time these handlers run, the middleware has already
//! verified the bearer token. Signup just materializes the profile row,
//! login records the event.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::identity::AuthUser;
use crate::middleware::RequestId;

use super::{map_db_error, record_api_log, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SignupRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignupData {
    message: &'static str,
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginData {
    uid: String,
    email: Option<String>,
}

pub(super) async fn signup(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SignupData>>), ApiError> {
    let email = request
        .email
        .or_else(|| user.email.clone())
        .unwrap_or_default();
    let name = request.name.unwrap_or_else(|| "New User".to_string());

    let row = verdure_db::upsert_user(&state.pool, &user.uid, &email, &name, "")
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    record_api_log(
        &state.pool,
        "auth/signup",
        Some(&user.uid),
        201,
        serde_json::json!({ "email": row.email }),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: SignupData {
                message: "User created",
                user_id: row.uid,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, ApiError> {
    let email = request.email.or_else(|| user.email.clone());

    record_api_log(
        &state.pool,
        "auth/login",
        Some(&user.uid),
        200,
        serde_json::json!({}),
    )
    .await;

    Ok(Json(ApiResponse {
        data: LoginData {
            uid: user.uid,
            email,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_data_serializes_camel_case() {
        let data = SignupData {
            message: "User created",
            user_id: "uid-1".to_string(),
        };
        let json = serde_json::to_string(&data).expect("serialize");
        assert!(json.contains("\"userId\":\"uid-1\""));
    }

    #[test]
    fn signup_request_tolerates_empty_body() {
        let request: SignupRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(request.email.is_none());
        assert!(request.name.is_none());
    }

    #[test]
    fn login_data_includes_null_email_when_unknown() {
        let data = LoginData {
            uid: "uid-1".to_string(),
            email: None,
        };
        let json = serde_json::to_string(&data).expect("serialize");
        assert!(json.contains("\"email\":null"));
    }
}
