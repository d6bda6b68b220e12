use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage connection string: {0}")]
    InvalidConnectionString(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Container creation hit an existing container. Callers that only need
    /// the container to exist treat this as success.
    #[error("container '{container}' already exists")]
    ContainerAlreadyExists { container: String },

    /// Any other non-2xx answer from the storage service.
    #[error("storage service returned {status} ({code}) for {url}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
        url: String,
    },

    #[error("failed to serialize batch: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage URL: {0}")]
    InvalidUrl(String),
}
