//! Info command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::TranscriptFetcher;
use anyhow::Result;

/// Run the info command.
pub async fn run_info(url: &str, json: bool, settings: &Settings) -> Result<()> {
    preflight::check_extractor(settings)?;

    let fetcher = TranscriptFetcher::new(settings);

    let spinner = Output::spinner("Fetching video info...");
    let result = fetcher.fetch_metadata(url).await;
    spinner.finish_and_clear();

    let metadata = result.inspect_err(|e| Output::error(&format!("{}", e)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        Output::video_info(&metadata);
    }

    Ok(())
}
