//! CLI module for Briefly.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Briefly - YouTube video retelling
///
/// Fetches a video's transcript with yt-dlp and asks an OpenAI-compatible
/// model for a short summary.
#[derive(Parser, Debug)]
#[command(name = "briefly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a YouTube video
    Retell {
        /// YouTube video URL
        url: String,

        /// Language of the transcript and the summary (default from config)
        #[arg(short, long, default_value = "")]
        language: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show video metadata
    Info {
        /// YouTube video URL
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the cleaned transcript of a video
    Transcript {
        /// YouTube video URL
        url: String,

        /// Subtitle language (default from config)
        #[arg(short, long, default_value = "")]
        language: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// Whether the command talks to the summarization provider.
    pub fn needs_provider(&self) -> bool {
        matches!(self, Commands::Retell { .. } | Commands::Serve { .. })
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (API key redacted)
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retell() {
        let cli = Cli::try_parse_from([
            "briefly",
            "-vv",
            "retell",
            "https://youtu.be/dQw4w9WgXcQ",
            "-l",
            "ru",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Retell { url, language, json } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(language, "ru");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_needs_provider() {
        let cli = Cli::try_parse_from(["briefly", "info", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        assert!(!cli.command.needs_provider());
        let cli = Cli::try_parse_from(["briefly", "serve", "--port", "8080"]).unwrap();
        assert!(cli.command.needs_provider());
    }
}
