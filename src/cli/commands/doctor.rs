//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::{Prompts, ProviderConfig, Settings};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Briefly Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_check = check_tool(&settings.extractor.binary);
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("Summarization Provider").bold());
    let provider_checks = check_provider(settings);
    for check in &provider_checks {
        check.print();
    }
    checks.extend(provider_checks);

    println!();

    println!("{}", style("Directories").bold());
    let dir_check = check_scratch_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(config_path), check_prompts(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Briefly.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Briefly is ready to use.");
    }

    Ok(())
}

/// Check that the extractor binary runs and report its version.
fn check_tool(name: &str) -> CheckResult {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            let version_display = if version.chars().count() > 50 {
                format!("{}...", version.chars().take(50).collect::<String>())
            } else {
                version
            };

            CheckResult::ok(name, &version_display)
        }
        Ok(_) => CheckResult::error(name, "installed but not working", install_hint_ytdlp()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, "not found", install_hint_ytdlp())
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), install_hint_ytdlp()),
    }
}

/// Validate the provider settings the way startup does.
fn check_provider(settings: &Settings) -> Vec<CheckResult> {
    let config = match ProviderConfig::from_settings(settings) {
        Ok(config) => config,
        Err(e) => {
            return vec![CheckResult::error(
                "Provider",
                &e.to_string(),
                "Set OPENAI_BASE_URL, OPENAI_API_KEY and OPENAI_MODEL (or the [provider] table)",
            )]
        }
    };

    let mut results = vec![
        CheckResult::ok("Base URL", &config.base_url),
        CheckResult::ok("Model", &config.model),
        CheckResult::ok("API key", &format!("configured ({})", mask_key(&config.api_key))),
        CheckResult::ok(
            "Attempts",
            &format!(
                "{} x {}s timeout",
                config.max_attempts,
                config.timeout.as_secs()
            ),
        ),
    ];

    if let Some(proxy) = &config.proxy {
        results.push(CheckResult::ok("Proxy", proxy));
    }

    results
}

/// Check the scratch directory for subtitle files.
fn check_scratch_dir(settings: &Settings) -> CheckResult {
    let dir = settings.scratch_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        return CheckResult::error(
            "Scratch directory",
            &format!("{} ({})", dir.display(), e),
            "Set general.scratch_dir to a writable directory",
        );
    }

    match tempfile::tempdir_in(&dir) {
        Ok(_) => CheckResult::ok("Scratch directory", &format!("{}", dir.display())),
        Err(e) => CheckResult::error(
            "Scratch directory",
            &format!("{} is not writable ({})", dir.display(), e),
            "Set general.scratch_dir to a writable directory",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults and environment",
            "Create with: briefly config init",
        )
    }
}

/// Check that custom prompt templates load.
fn check_prompts(settings: &Settings) -> CheckResult {
    match Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
        &settings.general.default_language,
    ) {
        Ok(prompts) => CheckResult::ok(
            "Prompts",
            &format!("default language '{}'", prompts.default_language),
        ),
        Err(e) => CheckResult::error(
            "Prompts",
            &e.to_string(),
            "Fix or remove summary.toml in prompts.custom_dir",
        ),
    }
}

/// Mask an API key for display.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
