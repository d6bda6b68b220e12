use thiserror::Error;

/// Errors returned by the NewsAPI client.
///
/// Every variant means the news source could not deliver articles; callers
/// treat them all as fatal.
#[derive(Debug, Error)]
pub enum NewsError {
    /// No API key was configured.
    #[error("NewsAPI key is not configured (set NEWSAPI_KEY)")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NewsAPI answered with `"status": "error"`.
    #[error("NewsAPI error {code}: {message}")]
    Api { code: String, message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
