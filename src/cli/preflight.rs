//! Pre-flight checks before running the pipeline.
//!
//! Validates that the extractor is available before starting work that would
//! otherwise fail on its first invocation.

use crate::config::Settings;
use crate::error::{BrieflyError, Result};
use std::process::Command;

/// Check that the configured yt-dlp binary runs.
pub fn check_extractor(settings: &Settings) -> Result<()> {
    check_tool(&settings.extractor.binary)
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(BrieflyError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BrieflyError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(BrieflyError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
