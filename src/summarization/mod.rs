//! Transcript summarization through a remote language model.

mod openai;

pub use openai::OpenAISummarizer;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Trait for summarization providers.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`, writing the summary in `language`.
    async fn summarize(&self, text: &str, language: &str) -> Result<String>;
}

/// A finished summary for one video in one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub video_id: String,
    pub language: String,
    pub text: String,
}
