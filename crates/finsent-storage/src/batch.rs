//! Batch serialization and naming.

use chrono::{DateTime, Utc};
use finsent_core::SentimentRecord;

use crate::error::StorageError;
use crate::sink::ResultSink;

/// Container batches are written to unless configured otherwise.
pub const DEFAULT_CONTAINER: &str = "sentiment-results";

/// Object name for a batch written at `at`: `results_YYYYMMDD_HHMMSS.json`.
#[must_use]
pub fn object_name(at: DateTime<Utc>) -> String {
    format!("results_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Serialize a batch as a pretty-printed JSON array (2-space indent).
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] if serialization fails.
pub fn serialize_batch(records: &[SentimentRecord]) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Ensure the container, then upload the batch under a name derived from `at`.
///
/// Returns the object name that was written.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the upload fails. Container
/// creation problems are not errors (see [`ResultSink::ensure_container`]).
pub async fn persist_batch<K>(
    sink: &K,
    container: &str,
    records: &[SentimentRecord],
    at: DateTime<Utc>,
) -> Result<String, StorageError>
where
    K: ResultSink + ?Sized,
{
    sink.ensure_container(container).await;

    let name = object_name(at);
    let payload = serialize_batch(records)?;
    let bytes = payload.len();
    sink.put_object(container, &name, payload).await?;

    tracing::debug!(container, object = %name, bytes, records = records.len(), "batch uploaded");
    Ok(name)
}
