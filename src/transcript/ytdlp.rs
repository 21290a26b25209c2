//! yt-dlp process invocation with bounded retries.

use crate::config::ExtractorSettings;
use crate::error::{BrieflyError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs the extraction tool with a complete argument vector.
#[async_trait]
pub trait ExtractorRunner: Send + Sync {
    /// Run once and return stdout. Non-zero exit is a `ToolFailed` error.
    async fn run(&self, args: &[String]) -> Result<Vec<u8>>;
}

/// The real `yt-dlp` executable.
pub struct YtDlp {
    binary: String,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ExtractorRunner for YtDlp {
    async fn run(&self, args: &[String]) -> Result<Vec<u8>> {
        debug!(binary = %self.binary, ?args, "Running extractor");

        let result = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BrieflyError::ToolNotFound(self.binary.clone()));
            }
            Err(e) => {
                return Err(BrieflyError::ToolFailed(format!(
                    "{} execution failed: {e}",
                    self.binary
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BrieflyError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

/// Retry policy for extractor invocations.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &ExtractorSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            delay: Duration::from_millis(settings.retry_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }
}

/// Run the extractor until it succeeds or the attempt budget is spent.
///
/// Every failure is retried the same way; the last error is returned.
/// A missing executable fails immediately.
pub async fn run_with_retry(
    runner: &dyn ExtractorRunner,
    args: &[String],
    policy: &RetryPolicy,
) -> Result<Vec<u8>> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match runner.run(args).await {
            Ok(stdout) => {
                if attempt > 1 {
                    debug!(attempt, "Extractor succeeded after retry");
                }
                return Ok(stdout);
            }
            Err(e @ BrieflyError::ToolNotFound(_)) => return Err(e),
            Err(e) => {
                warn!(attempt, max_attempts = attempts, error = %e, "Extractor attempt failed");
                last_error = Some(e);
                if attempt < attempts && !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| BrieflyError::ToolFailed("extractor never ran".to_string())))
}
