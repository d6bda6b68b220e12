use async_trait::async_trait;
use finsent_core::RawArticle;

use crate::error::NewsError;

/// Anything that can return a finite, ordered list of articles for a query.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch up to `page_size` articles matching `query` in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError`] when the source cannot be reached or rejects the
    /// credential.
    async fn fetch(
        &self,
        query: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, NewsError>;
}
