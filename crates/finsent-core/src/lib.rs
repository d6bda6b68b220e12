//! Shared domain types and configuration for finsent.

pub mod app_config;
pub mod articles;
pub mod config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use articles::{RawArticle, SentimentRecord};
pub use config::{load_app_config, load_app_config_from_env, validate_page_size};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
