//! One end-to-end job: warm up the model, fetch news, score it, persist it.

use chrono::Utc;
use finsent_core::AppConfig;
use finsent_news::{NewsError, NewsSource};
use finsent_sentiment::{run_batch_concurrent, SentimentError, SentimentScorer};
use finsent_storage::{persist_batch, ResultSink, StorageError};
use thiserror::Error;

/// Knobs for a single job, resolved from config and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JobParams {
    pub query: String,
    pub language: String,
    pub page_size: u32,
    pub concurrency: usize,
    pub container: String,
}

impl JobParams {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            query: config.news_query.clone(),
            language: config.news_language.clone(),
            page_size: config.news_page_size,
            concurrency: config.scoring_concurrency,
            container: config.storage_container.clone(),
        }
    }
}

/// What a finished job did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JobSummary {
    pub analyzed: usize,
    /// `None` when persistence was disabled.
    pub object_name: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum JobError {
    #[error("news source unavailable: {0}")]
    SourceUnavailable(#[from] NewsError),

    #[error("sentiment scoring failed: {0}")]
    ScoringFailure(#[from] SentimentError),

    #[error("failed to persist results: {0}")]
    Persist(#[from] StorageError),
}

/// Run one job against the given collaborators.
///
/// With `sink == None` the batch is scored but not written anywhere.
///
/// # Errors
///
/// Returns [`JobError`] for the first stage that fails. Nothing is written
/// unless every article was scored.
pub(crate) async fn run_job<N, S>(
    source: &N,
    scorer: &S,
    sink: Option<&dyn ResultSink>,
    params: &JobParams,
) -> Result<JobSummary, JobError>
where
    N: NewsSource + ?Sized,
    S: SentimentScorer + ?Sized,
{
    tracing::info!("loading sentiment model");
    scorer.warm_up().await?;

    tracing::info!(
        query = %params.query,
        language = %params.language,
        page_size = params.page_size,
        "fetching news"
    );
    let articles = source
        .fetch(&params.query, &params.language, params.page_size)
        .await?;

    let records = run_batch_concurrent(&articles, scorer, params.concurrency).await?;
    let analyzed = records.len();
    tracing::info!(analyzed, "analyzed {analyzed} articles");

    let Some(sink) = sink else {
        tracing::info!("persistence disabled: no storage connection string configured");
        return Ok(JobSummary {
            analyzed,
            object_name: None,
        });
    };

    let name = persist_batch(sink, &params.container, &records, Utc::now()).await?;
    tracing::info!(container = %params.container, object = %name, "results saved to {name}");

    Ok(JobSummary {
        analyzed,
        object_name: Some(name),
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
