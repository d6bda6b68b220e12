use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SentimentError;

/// A model verdict for one text: the top label and its probability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Score {
    /// Scorer-defined class, e.g. `positive`, `negative`, `neutral`.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

/// Maps text to a sentiment label and confidence.
///
/// Callers invoke [`SentimentScorer::warm_up`] once before the first
/// [`SentimentScorer::score`]; the pipeline awaits each call in turn unless
/// asked to run concurrently.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score a single text.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the model cannot produce a verdict.
    async fn score(&self, text: &str) -> Result<Score, SentimentError>;

    /// Make the model ready to score. Local scorers have nothing to do.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the model cannot be loaded.
    async fn warm_up(&self) -> Result<(), SentimentError> {
        Ok(())
    }
}
