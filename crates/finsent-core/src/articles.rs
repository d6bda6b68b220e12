use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news search result as returned by a news source, before analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub title: String,
    /// Absent descriptions are legal and read as empty text.
    pub description: Option<String>,
    /// Publisher display name.
    pub source_name: String,
}

impl RawArticle {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            source_name: source_name.into(),
        }
    }

    /// Description text, with an absent value normalized to `""`.
    #[must_use]
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// One scored article, the unit persisted in a batch.
///
/// Fields serialize in the order `timestamp, title, description, sentiment,
/// confidence, source`. Records are built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    timestamp: DateTime<Utc>,
    title: String,
    description: String,
    #[serde(rename = "sentiment")]
    sentiment_label: String,
    confidence: f64,
    source: String,
}

impl SentimentRecord {
    /// Assemble a record from an article and the scorer's verdict.
    #[must_use]
    pub fn from_article(
        article: &RawArticle,
        sentiment_label: impl Into<String>,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            title: article.title.clone(),
            description: article.description_or_empty().to_string(),
            sentiment_label: sentiment_label.into(),
            confidence,
            source: article.source_name.clone(),
        }
    }

    /// When this record was created (not when the article was published).
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn sentiment_label(&self) -> &str {
        &self.sentiment_label
    }

    /// Scorer confidence in `[0, 1]`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}
