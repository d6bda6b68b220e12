//! HTTP client for the NewsAPI REST API.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling and typed response
//! deserialization. The key travels in the `X-Api-Key` header so it never
//! appears in URLs or error messages.

use std::time::Duration;

use async_trait::async_trait;
use finsent_core::RawArticle;
use reqwest::{Client, Url};

use crate::error::NewsError;
use crate::source::NewsSource;
use crate::types::{ErrorResponse, EverythingResponse};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// Client for NewsAPI.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI.
    ///
    /// A missing `api_key` is accepted here and reported on the first fetch.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`NewsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| NewsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url,
        })
    }

    /// Fetches one page of articles from `/everything`.
    ///
    /// Articles are returned in the order NewsAPI lists them.
    ///
    /// # Errors
    ///
    /// - [`NewsError::MissingApiKey`] if no key was configured (no request is sent).
    /// - [`NewsError::Api`] if NewsAPI returns an error envelope (bad key, bad params).
    /// - [`NewsError::UnexpectedStatus`] for a non-2xx response without an envelope.
    /// - [`NewsError::Http`] on network failure.
    /// - [`NewsError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_everything(
        &self,
        query: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, NewsError> {
        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;
        let url = self.build_url(
            "everything",
            &[
                ("q", query),
                ("language", language),
                ("pageSize", &page_size.to_string()),
            ],
        )?;

        let response = self
            .client
            .get(url.clone())
            .header("X-Api-Key", api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(NewsError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Err(e) => {
                return Err(NewsError::Deserialize {
                    context: url.to_string(),
                    source: e,
                });
            }
        };

        Self::check_api_error(&value)?;
        if !status.is_success() {
            return Err(NewsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let envelope: EverythingResponse =
            serde_json::from_value(value).map_err(|e| NewsError::Deserialize {
                context: format!("everything(q={query})"),
                source: e,
            })?;

        tracing::debug!(
            query,
            total_results = envelope.total_results,
            returned = envelope.articles.len(),
            "NewsAPI search complete"
        );

        Ok(envelope.articles.into_iter().map(RawArticle::from).collect())
    }

    /// Builds an endpoint URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, NewsError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| NewsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Returns [`NewsError::Api`] when the envelope's `status` is `"error"`.
    fn check_api_error(body: &serde_json::Value) -> Result<(), NewsError> {
        if body.get("status").and_then(serde_json::Value::as_str) != Some("error") {
            return Ok(());
        }
        let parsed: ErrorResponse =
            serde_json::from_value(body.clone()).unwrap_or(ErrorResponse {
                code: None,
                message: None,
            });
        Err(NewsError::Api {
            code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
            message: parsed
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(
        &self,
        query: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, NewsError> {
        self.fetch_everything(query, language, page_size).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
