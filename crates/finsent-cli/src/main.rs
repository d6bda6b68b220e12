mod run;

use clap::{Parser, Subcommand};
use finsent_core::{validate_page_size, AppConfig};
use finsent_news::NewsApiClient;
use finsent_sentiment::InferenceClient;
use finsent_storage::{BlobClient, ResultSink};
use tracing_subscriber::EnvFilter;

use crate::run::{run_job, JobParams};

#[derive(Debug, Parser)]
#[command(name = "finsent")]
#[command(about = "Score news sentiment with FinBERT and store the results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch news, score every article, and upload the batch (the default)
    Run {
        /// Search query (overrides `FINSENT_NEWS_QUERY`)
        #[arg(long)]
        query: Option<String>,
        /// Article language (overrides `FINSENT_NEWS_LANGUAGE`)
        #[arg(long)]
        language: Option<String>,
        /// Number of articles to fetch, 1-100 (overrides `FINSENT_NEWS_PAGE_SIZE`)
        #[arg(long)]
        page_size: Option<u32>,
        /// Scoring calls kept in flight (overrides `FINSENT_SCORING_CONCURRENCY`)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Score a single text and print the label and confidence
    Score {
        /// Text to classify
        text: String,
    },
}

/// Flag values for `run`; `None` keeps the configured value.
#[derive(Debug, Default)]
struct RunOverrides {
    query: Option<String>,
    language: Option<String>,
    page_size: Option<u32>,
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = finsent_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run {
            query,
            language,
            page_size,
            concurrency,
        }) => {
            let overrides = RunOverrides {
                query,
                language,
                page_size,
                concurrency,
            };
            run_command(&config, overrides).await?;
        }
        Some(Commands::Score { text }) => score_command(&config, &text).await?,
        None => run_command(&config, RunOverrides::default()).await?,
    }

    Ok(())
}

/// Layer CLI flags over the configured job parameters.
///
/// # Errors
///
/// Returns an error if `--page-size` is outside `1..=100` or `--concurrency`
/// is zero.
fn apply_overrides(mut params: JobParams, overrides: RunOverrides) -> anyhow::Result<JobParams> {
    if let Some(query) = overrides.query {
        params.query = query;
    }
    if let Some(language) = overrides.language {
        params.language = language;
    }
    if let Some(page_size) = overrides.page_size {
        validate_page_size("--page-size", page_size)?;
        params.page_size = page_size;
    }
    if let Some(concurrency) = overrides.concurrency {
        anyhow::ensure!(concurrency >= 1, "--concurrency must be at least 1");
        params.concurrency = concurrency;
    }
    Ok(params)
}

async fn run_command(config: &AppConfig, overrides: RunOverrides) -> anyhow::Result<()> {
    let params = apply_overrides(JobParams::from_config(config), overrides)?;
    tracing::info!(?config, "starting");

    let source = NewsApiClient::with_base_url(
        config.newsapi_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.newsapi_base_url,
    )?;
    let scorer = InferenceClient::new(
        &config.inference_base_url,
        &config.sentiment_model,
        config.hf_api_token.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let sink = config
        .storage_connection_string
        .as_deref()
        .map(|conn| {
            BlobClient::from_connection_string(conn, config.request_timeout_secs, &config.user_agent)
        })
        .transpose()?;

    let summary = run_job(
        &source,
        &scorer,
        sink.as_ref().map(|s| s as &dyn ResultSink),
        &params,
    )
    .await?;

    match &summary.object_name {
        Some(name) => println!("analyzed {} articles, saved to {name}", summary.analyzed),
        None => println!("analyzed {} articles (persistence disabled)", summary.analyzed),
    }
    tracing::info!(analyzed = summary.analyzed, "done");
    Ok(())
}

async fn score_command(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let scorer = InferenceClient::new(
        &config.inference_base_url,
        &config.sentiment_model,
        config.hf_api_token.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let score = scorer.classify(text).await?;
    println!("{} {:.4}", score.label, score.score);
    Ok(())
}
