use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference endpoint answered with a non-2xx status.
    #[error("inference error (status {status}): {message}")]
    Inference { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model returned no predictions")]
    EmptyPrediction,

    #[error("invalid inference URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
