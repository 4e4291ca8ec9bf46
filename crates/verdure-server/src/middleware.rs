use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::identity::{AuthUser, IdentityClient};

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Identity-verification settings used by middleware.
///
/// When no provider API key is configured in development, verification is
/// disabled and requests run as a fixed local identity — the same
/// local-iteration escape hatch the rest of the stack uses for missing
/// upstream credentials.
#[derive(Clone)]
pub struct AuthState {
    verifier: Option<Arc<IdentityClient>>,
    pub enabled: bool,
}

/// Fixed identity assumed when verification is disabled in development.
const DEV_UID: &str = "dev-user";

impl AuthState {
    /// Builds auth config from the application config.
    ///
    /// In development and test, a missing identity API key disables
    /// verification. In production it fails startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing in production or the identity
    /// client cannot be constructed.
    pub fn from_config(config: &verdure_core::AppConfig) -> anyhow::Result<Self> {
        match &config.identity_api_key {
            Some(key) => {
                let verifier = IdentityClient::new(
                    &config.identity_base_url,
                    key,
                    config.http_request_timeout_secs,
                    &config.http_user_agent,
                )?;
                Ok(Self {
                    verifier: Some(Arc::new(verifier)),
                    enabled: true,
                })
            }
            None => {
                if config.env == verdure_core::Environment::Production {
                    anyhow::bail!(
                        "VERDURE_IDENTITY_API_KEY is required in production; tokens cannot be verified without it"
                    );
                }
                tracing::warn!(
                    "VERDURE_IDENTITY_API_KEY not set; identity verification disabled in {} environment",
                    config.env
                );
                Ok(Self {
                    verifier: None,
                    enabled: false,
                })
            }
        }
    }

    /// Auth disabled outright; used by tests.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            verifier: None,
            enabled: false,
        }
    }
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Sliding fixed-window limiter for simple API protection.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware that resolves the bearer token to an [`AuthUser`] extension.
///
/// With verification disabled (development without a provider key), every
/// request runs as the fixed dev identity instead.
pub async fn require_identity(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        req.extensions_mut().insert(AuthUser {
            uid: DEV_UID.to_string(),
            email: None,
        });
        return next.run(req).await;
    }

    let Some(token) = extract_bearer_token(req.headers().get(AUTHORIZATION)) else {
        return unauthorized();
    };

    let Some(verifier) = auth.verifier.as_deref() else {
        // enabled implies a verifier; guard anyway rather than panic.
        return unauthorized();
    };

    match verifier.verify_id_token(token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token verification failed");
            unauthorized()
        }
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "rate_limited",
                    message: "rate limit exceeded",
                },
            }),
        )
            .into_response();
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(MiddlewareErrorBody {
            error: MiddlewareError {
                code: "unauthorized",
                message: "missing or invalid bearer token",
            },
        }),
    )
        .into_response()
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn extract_bearer_token_rejects_empty_token() {
        let header = HeaderValue::from_static("Bearer   ");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn disabled_auth_state_has_no_verifier() {
        let state = AuthState::disabled();
        assert!(!state.enabled);
        assert!(state.verifier.is_none());
    }
}
