//! Transcript command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::TranscriptFetcher;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    language: &str,
    output: Option<&str>,
    settings: &Settings,
) -> Result<()> {
    preflight::check_extractor(settings)?;

    let fetcher = TranscriptFetcher::new(settings);

    let spinner = Output::spinner("Fetching transcript...");
    let result = fetcher.fetch_transcript(url, language).await;
    spinner.finish_and_clear();

    let transcript = result.inspect_err(|e| Output::error(&format!("{}", e)))?;

    match output {
        Some(path) => {
            let path = Settings::expand_path(path);
            std::fs::write(&path, format!("{transcript}\n"))?;
            Output::success(&format!("Transcript written to {}", path.display()));
        }
        None => println!("{}", transcript),
    }

    Ok(())
}
