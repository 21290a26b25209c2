//! Retell command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::{ProviderConfig, Settings};
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the retell command.
pub async fn run_retell(
    url: &str,
    language: &str,
    json: bool,
    settings: &Settings,
    provider: ProviderConfig,
) -> Result<()> {
    if let Err(e) = preflight::check_extractor(settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'briefly doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings, provider)?;

    let spinner = Output::spinner("Fetching transcript and summarizing...");
    let result = orchestrator.retell_with_info(url, language).await;
    spinner.finish_and_clear();

    let retelling = match result {
        Ok(r) => r,
        Err(e) => {
            Output::error(&format!("Retelling failed during {}: {}", e.stage(), e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&retelling)?);
        return Ok(());
    }

    Output::header(&retelling.metadata.title);
    if let Some(uploader) = &retelling.metadata.uploader {
        Output::kv("Uploader", uploader);
    }
    println!();
    println!("{}", retelling.summary.text);

    Ok(())
}
