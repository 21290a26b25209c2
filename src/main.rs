//! Briefly CLI entry point.

use anyhow::Result;
use briefly::cli::{commands, Cli, Commands, Output};
use briefly::config::{ProviderConfig, Settings};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("briefly={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let settings = Settings::load_from(Some(config_path.as_path()))?;

    // Provider problems are reported before any work starts
    let validated = if cli.command.needs_provider() {
        match ProviderConfig::from_settings(&settings) {
            Ok(provider) => Some(provider),
            Err(e) => {
                Output::error(&e.to_string());
                Output::info("Run 'briefly doctor' to check your configuration.");
                std::process::exit(2);
            }
        }
    } else {
        None
    };

    let provider = || {
        validated
            .clone()
            .ok_or_else(|| anyhow::anyhow!("provider configuration was not loaded"))
    };

    match &cli.command {
        Commands::Retell { url, language, json } => {
            commands::run_retell(url, language, *json, &settings, provider()?).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.clone(), *port, &settings, provider()?).await?;
        }

        Commands::Info { url, json } => {
            commands::run_info(url, *json, &settings).await?;
        }

        Commands::Transcript {
            url,
            language,
            output,
        } => {
            commands::run_transcript(url, language, output.as_deref(), &settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, &config_path)?;
        }
    }

    Ok(())
}
