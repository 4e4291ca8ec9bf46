//! HTTP client for the Open Food Facts category search endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::engine::Candidate;
use crate::error::ProduceError;
use crate::retry::retry_with_backoff;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<SearchProduct>,
}

#[derive(Debug, Deserialize)]
struct SearchProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    categories_tags_en: Option<Vec<String>>,
}

/// Client for the vegetable category search on the food database.
///
/// Handles rate limiting (429) and other non-2xx responses as typed errors,
/// with automatic exponential-backoff retry for transient failures.
pub struct FoodFactsClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl FoodFactsClient {
    /// Creates a client with configured timeout, `User-Agent`, and retry
    /// policy. `max_retries = 0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`ProduceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ProduceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of vegetable candidates.
    ///
    /// Products with a missing name come back as empty-name candidates; the
    /// pipeline's filter rejects those with a reason instead of this client
    /// silently dropping them.
    ///
    /// # Errors
    ///
    /// - [`ProduceError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ProduceError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ProduceError::Http`] — network failure after all retries exhausted.
    /// - [`ProduceError::Deserialize`] — response body is not the expected JSON.
    pub async fn fetch_candidates(&self, page_size: u32) -> Result<Vec<Candidate>, ProduceError> {
        let url = self.search_url(page_size)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ProduceError::RateLimited {
                        domain: self.domain(),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ProduceError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
                    ProduceError::Deserialize {
                        context: format!("vegetable search page from {}", self.domain()),
                        source: e,
                    }
                })?;

                Ok(parsed
                    .products
                    .into_iter()
                    .map(|product| Candidate {
                        name: product.product_name.unwrap_or_default(),
                        category: product.categories_tags_en.map(|tags| tags.join(", ")),
                    })
                    .collect())
            }
        })
        .await
    }

    fn search_url(&self, page_size: u32) -> Result<String, ProduceError> {
        let base = format!("{}/api/v2/search", self.base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| ProduceError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("categories_tags_en", "vegetables")
            .append_pair("fields", "product_name,categories_tags_en")
            .append_pair("page_size", &page_size.to_string());

        Ok(url.to_string())
    }

    fn domain(&self) -> String {
        self.base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> FoodFactsClient {
        FoodFactsClient::new(base_url, 30, "verdure-test/0.1", 0, 0).expect("client builds")
    }

    #[test]
    fn search_url_includes_category_and_page_size() {
        let url = client("https://food.example.com").search_url(600).unwrap();
        assert_eq!(
            url,
            "https://food.example.com/api/v2/search?categories_tags_en=vegetables&fields=product_name%2Ccategories_tags_en&page_size=600"
        );
    }

    #[test]
    fn search_url_strips_trailing_slash() {
        let url = client("https://food.example.com/").search_url(50).unwrap();
        assert!(url.starts_with("https://food.example.com/api/v2/search?"));
    }

    #[test]
    fn search_url_rejects_invalid_base() {
        let result = client("not a url").search_url(10);
        assert!(matches!(result, Err(ProduceError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn domain_strips_scheme_and_path() {
        assert_eq!(client("https://food.example.com").domain(), "food.example.com");
        assert_eq!(client("http://localhost:9999").domain(), "localhost:9999");
    }
}
