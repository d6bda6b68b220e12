//! Sentiment scoring for finsent.
//!
//! Turns each fetched article into a [`finsent_core::SentimentRecord`] by
//! scoring `"{title}. {description}"` with a financial-sentiment model served
//! by the Hugging Face Inference API (`ProsusAI/finbert` by default).

pub mod error;
pub mod inference;
pub mod pipeline;
pub mod scorer;

pub use error::SentimentError;
pub use inference::InferenceClient;
pub use pipeline::{build_record, compose_text, run_batch, run_batch_concurrent};
pub use scorer::{Score, SentimentScorer};
