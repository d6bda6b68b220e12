//! NewsAPI response types.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! payload is ignored by serde.

use finsent_core::RawArticle;
use serde::Deserialize;

/// Envelope returned by `GET /v2/everything` on success.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EverythingResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<ArticleItem>,
}

/// Envelope returned when `status` is `"error"`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One article entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleItem {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Publisher reference: `{ "id": "reuters", "name": "Reuters" }`.
#[derive(Debug, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ArticleItem> for RawArticle {
    fn from(item: ArticleItem) -> Self {
        let source_name = item.source.and_then(|s| s.name).unwrap_or_default();
        RawArticle {
            title: item.title.unwrap_or_default(),
            description: item.description,
            source_name,
        }
    }
}
