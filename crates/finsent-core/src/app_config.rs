#[derive(Clone)]
pub struct AppConfig {
    pub newsapi_key: Option<String>,
    pub newsapi_base_url: String,
    pub news_query: String,
    pub news_language: String,
    pub news_page_size: u32,
    pub hf_api_token: Option<String>,
    pub inference_base_url: String,
    pub sentiment_model: String,
    pub scoring_concurrency: usize,
    /// Absent means persistence is disabled for the run.
    pub storage_connection_string: Option<String>,
    pub storage_container: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl AppConfig {
    /// Whether a storage credential was provided.
    #[must_use]
    pub fn persistence_enabled(&self) -> bool {
        self.storage_connection_string.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("news_query", &self.news_query)
            .field("news_language", &self.news_language)
            .field("news_page_size", &self.news_page_size)
            .field(
                "hf_api_token",
                &self.hf_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("inference_base_url", &self.inference_base_url)
            .field("sentiment_model", &self.sentiment_model)
            .field("scoring_concurrency", &self.scoring_concurrency)
            .field(
                "storage_connection_string",
                &self.storage_connection_string.as_ref().map(|_| "[redacted]"),
            )
            .field("storage_container", &self.storage_container)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
