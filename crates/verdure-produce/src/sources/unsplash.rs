//! HTTP client for the image search API used by catalog enrichment.
//!
//! Enrichment is best-effort: callers swallow every error from this client
//! and substitute a placeholder URL, so there is no retry layer here — one
//! attempt per lookup.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::ProduceError;

#[derive(Debug, Deserialize)]
struct SearchPhotosResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    #[serde(default)]
    small: Option<String>,
}

/// Client for photo search, authenticated with a `Client-ID` access key.
pub struct ImageSearchClient {
    client: Client,
    base_url: String,
    access_key: String,
}

impl ImageSearchClient {
    /// # Errors
    ///
    /// Returns [`ProduceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        access_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProduceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        })
    }

    /// Searches for a photo of the given vegetable and returns the first
    /// result's small URL, or `None` when the search comes back empty.
    ///
    /// # Errors
    ///
    /// - [`ProduceError::RateLimited`] — HTTP 429.
    /// - [`ProduceError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ProduceError::Http`] — network failure.
    /// - [`ProduceError::Deserialize`] — response body is not the expected JSON.
    pub async fn search_photo(&self, query: &str) -> Result<Option<String>, ProduceError> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Client-ID {}", self.access_key),
            )
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProduceError::RateLimited {
                domain: self.domain(),
                retry_after_secs: 60,
            });
        }

        if !status.is_success() {
            return Err(ProduceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SearchPhotosResponse>(&body).map_err(|e| {
            ProduceError::Deserialize {
                context: format!("photo search for {query:?}"),
                source: e,
            }
        })?;

        Ok(parsed.results.into_iter().next().and_then(|p| p.urls.small))
    }

    fn search_url(&self, query: &str) -> Result<String, ProduceError> {
        let base = format!("{}/search/photos", self.base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| ProduceError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        // Anchor the query to produce photos; bare keys like "pepper" are
        // otherwise too ambiguous for the search API.
        url.query_pairs_mut()
            .append_pair("query", &format!("{query} vegetable"))
            .append_pair("per_page", "1")
            .append_pair("orientation", "landscape");

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
