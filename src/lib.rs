//! Briefly - YouTube video retelling
//!
//! Turns a YouTube link into a short summary: the video's subtitles are
//! downloaded with yt-dlp, cleaned into plain text and handed to any
//! OpenAI-compatible chat model.
//!
//! # Architecture
//!
//! - `config` - Settings, validated provider configuration and prompt templates
//! - `transcript` - Link validation, yt-dlp invocation and SRT cleaning
//! - `summarization` - Summarizer trait and the chat completions client
//! - `orchestrator` - The fetch-then-summarize pipeline
//! - `cli` - Command line and HTTP surfaces
//!
//! # Example
//!
//! ```rust,no_run
//! use briefly::config::{ProviderConfig, Settings};
//! use briefly::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let provider = ProviderConfig::from_settings(&settings)?;
//!     let orchestrator = Orchestrator::new(&settings, provider)?;
//!
//!     let summary = orchestrator
//!         .retell("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "en")
//!         .await?;
//!     println!("{}", summary.text);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod summarization;
pub mod transcript;

pub use error::{BrieflyError, Result};
