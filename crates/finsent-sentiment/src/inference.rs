//! Hugging Face Inference API client for text classification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::scorer::{Score, SentimentScorer};

/// Text sent by [`InferenceClient::warm_up`] to force the model to load.
const WARM_UP_TEXT: &str = "Markets were steady today.";

/// HTTP client for a hosted text-classification model.
pub struct InferenceClient {
    client: Client,
    endpoint: Url,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// Text classification returns either one list per input or a flat list,
/// depending on the serving backend.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<Score>>),
    Flat(Vec<Score>),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

impl InferenceClient {
    /// Create a client for `model` under `base_url`
    /// (e.g. `https://router.huggingface.co/hf-inference/models/` + `ProsusAI/finbert`).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`SentimentError::InvalidUrl`] if the endpoint does not parse.
    pub fn new(
        base_url: &str,
        model: &str,
        api_token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(model.trim_start_matches('/')))
            .map_err(|e| SentimentError::InvalidUrl {
                url: format!("{normalised}{model}"),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_token: api_token.map(str::to_owned),
        })
    }

    /// The full model URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Classify `text` and return the highest-scoring label.
    ///
    /// Sends `x-wait-for-model: true` so a cold model is loaded instead of
    /// answering 503.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Inference`] on a non-2xx response.
    /// - [`SentimentError::Deserialize`] if the body is not a prediction list.
    /// - [`SentimentError::EmptyPrediction`] if the model returned no labels.
    pub async fn classify(&self, text: &str) -> Result<Score, SentimentError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("x-wait-for-model", "true")
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(ErrorBody {
                    error,
                    estimated_time: Some(secs),
                }) => format!("{error} (estimated time {secs:.0}s)"),
                Ok(ErrorBody { error, .. }) => error,
                Err(_) => body.chars().take(200).collect(),
            };
            return Err(SentimentError::Inference {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ClassifyResponse =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        top_label(parsed).ok_or(SentimentError::EmptyPrediction)
    }

    /// Run one throwaway classification so the model is loaded before the
    /// first real article is scored.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`InferenceClient::classify`]; callers treat
    /// them as fatal.
    pub async fn warm_up(&self) -> Result<(), SentimentError> {
        let score = self.classify(WARM_UP_TEXT).await?;
        tracing::debug!(
            endpoint = %self.endpoint,
            label = %score.label,
            "sentiment model ready"
        );
        Ok(())
    }
}

#[async_trait]
impl SentimentScorer for InferenceClient {
    async fn score(&self, text: &str) -> Result<Score, SentimentError> {
        self.classify(text).await
    }

    async fn warm_up(&self) -> Result<(), SentimentError> {
        InferenceClient::warm_up(self).await
    }
}

fn top_label(response: ClassifyResponse) -> Option<Score> {
    let candidates = match response {
        ClassifyResponse::Nested(outer) => outer.into_iter().next()?,
        ClassifyResponse::Flat(flat) => flat,
    };
    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}
