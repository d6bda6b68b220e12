use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with both service credentials populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("NEWSAPI_KEY", "news-key");
    m.insert(
        "AZURE_STORAGE_CONNECTION_STRING",
        "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=a2V5;EndpointSuffix=core.windows.net",
    );
    m
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert!(cfg.newsapi_key.is_none());
    assert!(cfg.storage_connection_string.is_none());
    assert!(!cfg.persistence_enabled());
    assert!(cfg.hf_api_token.is_none());
    assert_eq!(cfg.newsapi_base_url, "https://newsapi.org/v2/");
    assert_eq!(cfg.news_query, "artificial intelligence OR AI");
    assert_eq!(cfg.news_language, "en");
    assert_eq!(cfg.news_page_size, 50);
    assert_eq!(
        cfg.inference_base_url,
        "https://router.huggingface.co/hf-inference/models/"
    );
    assert_eq!(cfg.sentiment_model, "ProsusAI/finbert");
    assert_eq!(cfg.scoring_concurrency, 1);
    assert_eq!(cfg.storage_container, "sentiment-results");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "finsent/0.1 (news-sentiment)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn credentials_are_read_when_present() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.newsapi_key.as_deref(), Some("news-key"));
    assert!(cfg.persistence_enabled());
}

#[test]
fn blank_storage_connection_string_disables_persistence() {
    let mut map = full_env();
    map.insert("AZURE_STORAGE_CONNECTION_STRING", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.storage_connection_string.is_none());
    assert!(!cfg.persistence_enabled());
}

#[test]
fn blank_newsapi_key_counts_as_missing() {
    let mut map = full_env();
    map.insert("NEWSAPI_KEY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.newsapi_key.is_none());
}

#[test]
fn news_page_size_override() {
    let mut map = full_env();
    map.insert("FINSENT_NEWS_PAGE_SIZE", "100");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.news_page_size, 100);
}

#[test]
fn news_page_size_invalid() {
    let mut map = full_env();
    map.insert("FINSENT_NEWS_PAGE_SIZE", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FINSENT_NEWS_PAGE_SIZE"),
        "expected InvalidEnvVar(FINSENT_NEWS_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn news_page_size_out_of_range() {
    for raw in ["0", "101"] {
        let mut map = full_env();
        map.insert("FINSENT_NEWS_PAGE_SIZE", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FINSENT_NEWS_PAGE_SIZE"),
            "expected InvalidEnvVar for page size {raw}, got: {result:?}"
        );
    }
}

#[test]
fn scoring_concurrency_override() {
    let mut map = full_env();
    map.insert("FINSENT_SCORING_CONCURRENCY", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scoring_concurrency, 4);
}

#[test]
fn scoring_concurrency_zero_is_rejected() {
    let mut map = full_env();
    map.insert("FINSENT_SCORING_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FINSENT_SCORING_CONCURRENCY"),
        "expected InvalidEnvVar(FINSENT_SCORING_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("FINSENT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FINSENT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FINSENT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn query_language_and_container_overrides() {
    let mut map = full_env();
    map.insert("FINSENT_NEWS_QUERY", "semiconductors");
    map.insert("FINSENT_NEWS_LANGUAGE", "de");
    map.insert("FINSENT_CONTAINER", "nightly-results");
    map.insert("FINSENT_SENTIMENT_MODEL", "yiyanghkust/finbert-tone");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.news_query, "semiconductors");
    assert_eq!(cfg.news_language, "de");
    assert_eq!(cfg.storage_container, "nightly-results");
    assert_eq!(cfg.sentiment_model, "yiyanghkust/finbert-tone");
}

#[test]
fn debug_output_redacts_credentials() {
    let mut map = full_env();
    map.insert("HF_API_TOKEN", "hf_secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("news-key"), "{rendered}");
    assert!(!rendered.contains("hf_secret"), "{rendered}");
    assert!(!rendered.contains("AccountKey"), "{rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn validate_page_size_accepts_bounds() {
    assert!(validate_page_size("X", 1).is_ok());
    assert!(validate_page_size("X", 100).is_ok());
}
