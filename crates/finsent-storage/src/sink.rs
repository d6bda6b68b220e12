use async_trait::async_trait;

use crate::error::StorageError;

/// Durable destination for serialized batches.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Make sure `container` exists.
    ///
    /// Best effort: this never fails. An existing container is the normal
    /// case; any other problem is logged and left for [`ResultSink::put_object`]
    /// to surface.
    async fn ensure_container(&self, container: &str);

    /// Store `payload` as `object` inside `container`, replacing any previous
    /// object of that name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the object could not be written.
    async fn put_object(
        &self,
        container: &str,
        object: &str,
        payload: Vec<u8>,
    ) -> Result<(), StorageError>;
}
