//! Token verification against the managed identity provider.
//!
//! The server never issues or validates tokens itself — every bearer token
//! is checked through the provider's `accounts:lookup` endpoint, and the
//! resulting identity rides the request as an extension.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

/// The verified identity attached to authenticated requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or expired ID token")]
    InvalidToken,

    #[error("unexpected HTTP status {status} from identity provider")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for token lookup: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid identity base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Client for the identity provider's token lookup endpoint.
pub struct IdentityClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl IdentityClient {
    /// # Errors
    ///
    /// Returns [`IdentityError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`IdentityError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| IdentityError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// Verifies an ID token and returns the identity it belongs to.
    ///
    /// The provider answers 400 for malformed/expired tokens; that and an
    /// empty `users` array both surface as [`IdentityError::InvalidToken`].
    ///
    /// # Errors
    ///
    /// - [`IdentityError::InvalidToken`] — token rejected by the provider.
    /// - [`IdentityError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`IdentityError::Http`] — network failure.
    /// - [`IdentityError::Deserialize`] — unexpected response shape.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<AuthUser, IdentityError> {
        let mut url =
            self.base_url
                .join("v1/accounts:lookup")
                .map_err(|e| IdentityError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(IdentityError::InvalidToken);
        }

        if !status.is_success() {
            return Err(IdentityError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<LookupResponse>(&body)
            .map_err(|e| IdentityError::Deserialize { source: e })?;

        parsed
            .users
            .into_iter()
            .next()
            .map(|user| AuthUser {
                uid: user.local_id,
                email: user.email,
            })
            .ok_or(IdentityError::InvalidToken)
    }
}
