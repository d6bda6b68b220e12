//! Result persistence for finsent.
//!
//! Serializes a scored batch to pretty JSON and uploads it to Azure Blob
//! Storage as `results_{YYYYMMDD_HHMMSS}.json`. Requests are authorized with
//! Shared Key signing or a SAS token taken from the connection string.

pub mod batch;
pub mod client;
pub mod connection;
pub mod error;
pub mod signing;
pub mod sink;

mod error_body;

pub use batch::{object_name, persist_batch, serialize_batch, DEFAULT_CONTAINER};
pub use client::BlobClient;
pub use connection::{Credential, StorageAccount};
pub use error::StorageError;
pub use sink::ResultSink;
