//! News search client for finsent.
//!
//! Fetches a single page of articles from the NewsAPI `everything` endpoint
//! and hands them to the pipeline as [`finsent_core::RawArticle`]s.

pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::NewsApiClient;
pub use error::NewsError;
pub use source::NewsSource;
