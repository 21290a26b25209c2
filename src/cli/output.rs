//! CLI output formatting utilities.

use crate::transcript::VideoMetadata;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        eprintln!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        eprintln!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print video metadata.
    pub fn video_info(meta: &VideoMetadata) {
        println!("{}", style(&meta.title).bold());
        Self::kv("ID", &meta.id);
        if let Some(uploader) = &meta.uploader {
            Self::kv("Uploader", uploader);
        }
        if let Some(duration) = meta.format_duration() {
            Self::kv("Duration", &duration);
        }
        if let Some(date) = meta.upload_date() {
            Self::kv("Uploaded", &date.format("%Y-%m-%d").to_string());
        }
        if let Some(language) = &meta.language {
            Self::kv("Language", language);
        }
        if let Some(thumbnail) = &meta.thumbnail {
            Self::kv("Thumbnail", thumbnail);
        }
    }

    /// Create a spinner on stderr.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
