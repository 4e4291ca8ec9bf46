//! HTTP client for the Spoonacular recipe API.
//!
//! Wraps `reqwest` with typed error handling for the statuses the free tier
//! actually produces: 402 when the daily quota is gone and 429 when calls
//! come in too fast. The API key travels as a query parameter.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::RecipesError;
use crate::types::RecipeSummary;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/";

/// Client for the Spoonacular REST API.
///
/// Use [`SpoonacularClient::new`] for production or
/// [`SpoonacularClient::with_base_url`] to point at a mock server in tests.
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SpoonacularClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`RecipesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, RecipesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RecipesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RecipesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, RecipesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Keep exactly one trailing slash so Url::join resolves relative
        // paths against the root rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| RecipesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches recipes by the ingredients the user already has.
    ///
    /// Calls `recipes/findByIngredients` with a comma-joined ingredient
    /// list, capped at `number` results.
    ///
    /// # Errors
    ///
    /// - [`RecipesError::QuotaExhausted`] — HTTP 402, daily points spent.
    /// - [`RecipesError::RateLimited`] — HTTP 429.
    /// - [`RecipesError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`RecipesError::Http`] — network failure.
    /// - [`RecipesError::Deserialize`] — unexpected response shape.
    pub async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        number: u8,
    ) -> Result<Vec<RecipeSummary>, RecipesError> {
        let url = self.build_url(
            "recipes/findByIngredients",
            &[
                ("ingredients", ingredients.join(",").as_str()),
                ("number", &number.to_string()),
                ("ranking", "2"),
                ("ignorePantry", "true"),
            ],
        )?;

        tracing::debug!(
            ingredients = ingredients.len(),
            number,
            "searching recipes by ingredients"
        );
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            return Err(RecipesError::QuotaExhausted);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RecipesError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(RecipesError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_api_key(url.as_str()),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<RecipeSummary>>(&body).map_err(|e| {
            RecipesError::Deserialize {
                context: format!("findByIngredients({} ingredients)", ingredients.len()),
                source: e,
            }
        })
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, RecipesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| RecipesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }

        Ok(url)
    }
}

/// Strips the `apiKey` query value before a URL lands in an error message.
fn redact_api_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let mut redacted = parsed.clone();
            redacted.query_pairs_mut().clear().extend_pairs(
                parsed
                    .query_pairs()
                    .map(|(k, v)| {
                        if k == "apiKey" {
                            (k.into_owned(), "[redacted]".to_string())
                        } else {
                            (k.into_owned(), v.into_owned())
                        }
                    }),
            );
            redacted.to_string()
        }
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_path_and_appends_api_key() {
        let client =
            SpoonacularClient::with_base_url("secret-key", 30, "verdure-test/0.1", "https://api.example.com")
                .expect("client builds");
        let url = client
            .build_url("recipes/findByIngredients", &[("ingredients", "tomato,leek")])
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/recipes/findByIngredients?ingredients=tomato%2Cleek&apiKey=secret-key"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = SpoonacularClient::with_base_url("k", 30, "ua", "not a url");
        assert!(matches!(result, Err(RecipesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn redact_api_key_hides_the_key_only() {
        let redacted =
            redact_api_key("https://api.example.com/recipes/findByIngredients?number=5&apiKey=secret");
        assert!(redacted.contains("number=5"));
        assert!(redacted.contains("apiKey=%5Bredacted%5D") || redacted.contains("apiKey=[redacted]"));
        assert!(!redacted.contains("secret"));
    }
}
