//! Article-to-record pipeline.
//!
//! One article in, one record out, order preserved. A scoring failure aborts
//! the whole batch; there is no per-article recovery.

use chrono::Utc;
use finsent_core::{RawArticle, SentimentRecord};
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::SentimentError;
use crate::scorer::SentimentScorer;

/// Build the model input for an article: `"{title}. {description}"`.
///
/// The separator is always present, so an empty description leaves a
/// trailing `". "`.
#[must_use]
pub fn compose_text(article: &RawArticle) -> String {
    format!("{}. {}", article.title, article.description_or_empty())
}

/// Score one article and stamp the record with the current time.
///
/// # Errors
///
/// Propagates the scorer's [`SentimentError`] unchanged.
pub async fn build_record<S>(
    article: &RawArticle,
    scorer: &S,
) -> Result<SentimentRecord, SentimentError>
where
    S: SentimentScorer + ?Sized,
{
    let text = compose_text(article);
    let verdict = scorer.score(&text).await?;
    Ok(SentimentRecord::from_article(
        article,
        verdict.label,
        verdict.score,
        Utc::now(),
    ))
}

/// Score every article in order, one at a time.
///
/// # Errors
///
/// Returns the first scoring failure; no partial batch is returned and later
/// articles are not scored.
pub async fn run_batch<S>(
    articles: &[RawArticle],
    scorer: &S,
) -> Result<Vec<SentimentRecord>, SentimentError>
where
    S: SentimentScorer + ?Sized,
{
    let mut records = Vec::with_capacity(articles.len());
    for (index, article) in articles.iter().enumerate() {
        let record = build_record(article, scorer).await.inspect_err(|e| {
            tracing::error!(index, title = %article.title, error = %e, "scoring failed, aborting batch");
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Like [`run_batch`], but keeps up to `concurrency` scoring calls in flight.
///
/// Results come back in input order. `concurrency <= 1` runs sequentially.
///
/// # Errors
///
/// Returns the first scoring failure in input order; in-flight calls are
/// dropped and no partial batch is returned.
pub async fn run_batch_concurrent<S>(
    articles: &[RawArticle],
    scorer: &S,
    concurrency: usize,
) -> Result<Vec<SentimentRecord>, SentimentError>
where
    S: SentimentScorer + ?Sized,
{
    if concurrency <= 1 {
        return run_batch(articles, scorer).await;
    }

    stream::iter(articles)
        .map(|article| build_record(article, scorer))
        .buffered(concurrency)
        .try_collect()
        .await
}
