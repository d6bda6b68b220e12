use crate::app_config::AppConfig;
use crate::ConfigError;

/// NewsAPI rejects page sizes above this.
const MAX_PAGE_SIZE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Credentials are all optional here: a missing news key fails later at fetch
/// time, and a missing storage connection string turns persistence off.
/// Empty or whitespace-only credentials count as missing.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let newsapi_key = optional("NEWSAPI_KEY");
    let storage_connection_string = optional("AZURE_STORAGE_CONNECTION_STRING");
    let hf_api_token = optional("HF_API_TOKEN");

    let newsapi_base_url = or_default("FINSENT_NEWSAPI_BASE_URL", "https://newsapi.org/v2/");
    let news_query = or_default("FINSENT_NEWS_QUERY", "artificial intelligence OR AI");
    let news_language = or_default("FINSENT_NEWS_LANGUAGE", "en");

    let news_page_size = parse_u32("FINSENT_NEWS_PAGE_SIZE", "50")?;
    validate_page_size("FINSENT_NEWS_PAGE_SIZE", news_page_size)?;

    let inference_base_url = or_default(
        "FINSENT_INFERENCE_BASE_URL",
        "https://router.huggingface.co/hf-inference/models/",
    );
    let sentiment_model = or_default("FINSENT_SENTIMENT_MODEL", "ProsusAI/finbert");

    let scoring_concurrency = parse_usize("FINSENT_SCORING_CONCURRENCY", "1")?;
    if scoring_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FINSENT_SCORING_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let storage_container = or_default("FINSENT_CONTAINER", "sentiment-results");
    let request_timeout_secs = parse_u64("FINSENT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FINSENT_USER_AGENT", "finsent/0.1 (news-sentiment)");
    let log_level = or_default("FINSENT_LOG_LEVEL", "info");

    Ok(AppConfig {
        newsapi_key,
        newsapi_base_url,
        news_query,
        news_language,
        news_page_size,
        hf_api_token,
        inference_base_url,
        sentiment_model,
        scoring_concurrency,
        storage_connection_string,
        storage_container,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Check a page size against the range NewsAPI accepts (`1..=100`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] naming `var` when out of range.
pub fn validate_page_size(var: &str, page_size: u32) -> Result<(), ConfigError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
