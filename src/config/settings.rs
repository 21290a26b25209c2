//! Configuration settings for Briefly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub provider: ProviderSettings,
    pub extractor: ExtractorSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Root directory for per-request scratch directories.
    pub scratch_dir: String,
    /// Language used when a request does not name one.
    pub default_language: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir()
                .join("briefly")
                .to_string_lossy()
                .into_owned(),
            default_language: "en".to_string(),
        }
    }
}

/// Chat-completion provider settings.
///
/// Endpoint, credential and model have no defaults: they must come from the
/// config file or the environment, and are validated by
/// [`ProviderConfig::from_settings`](super::ProviderConfig::from_settings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com/v1`).
    pub base_url: Option<String>,
    /// API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// Optional HTTP(S) proxy for provider requests.
    pub proxy: Option<String>,
    /// Timeout for a single request attempt, in seconds.
    pub timeout_seconds: u64,
    /// Total number of request attempts.
    pub max_attempts: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: None,
            proxy: None,
            timeout_seconds: 20,
            max_attempts: 3,
        }
    }
}

/// Settings for the yt-dlp invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Executable name or path.
    pub binary: String,
    /// Options prepended to every invocation (cookies, proxy, etc.).
    pub additional_options: Vec<String>,
    /// Total number of attempts per invocation.
    pub max_attempts: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            additional_options: Vec::new(),
            max_attempts: 3,
            retry_delay_ms: 0,
        }
    }
}

/// HTTP API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory containing a `summary.toml` with extra or replacement templates.
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment variables are applied on top of the file contents.
    pub fn load_from(path: Option<&Path>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override settings from environment-style key/value lookups.
    ///
    /// Empty values are ignored so that `KEY=` does not clear a file setting.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("OPENAI_BASE_URL") {
            self.provider.base_url = Some(v);
        }
        if let Some(v) = get("OPENAI_API_KEY") {
            self.provider.api_key = Some(v);
        }
        if let Some(v) = get("OPENAI_MODEL") {
            self.provider.model = Some(v);
        }
        if let Some(v) = get("PROXY_URL") {
            self.provider.proxy = Some(v);
        }
        if let Some(v) = get("YT_DLP_BINARY") {
            self.extractor.binary = v;
        }
        if let Some(v) = get("YT_DLP_ADDITIONAL_OPTIONS") {
            self.extractor.additional_options = v.split_whitespace().map(String::from).collect();
        }
        if let Some(v) = get("BRIEFLY_LANGUAGE") {
            self.general.default_language = v.trim().to_lowercase();
        }
    }

    /// Copy of the settings safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.provider.api_key.is_some() {
            copy.provider.api_key = Some("********".to_string());
        }
        copy
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::BrieflyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("briefly")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded scratch directory path.
    pub fn scratch_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.scratch_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.provider.timeout_seconds, 20);
        assert_eq!(settings.provider.max_attempts, 3);
        assert_eq!(settings.extractor.max_attempts, 3);
        assert_eq!(settings.extractor.binary, "yt-dlp");
        assert_eq!(settings.general.default_language, "en");
        assert!(settings.provider.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("OPENAI_API_KEY", "ollama"),
            ("OPENAI_MODEL", "llama3"),
            ("YT_DLP_ADDITIONAL_OPTIONS", "--cookies  /etc/cookies.txt --force-ipv4"),
            ("PROXY_URL", ""),
        ]));

        assert_eq!(settings.provider.base_url.as_deref(), Some("http://localhost:11434/v1"));
        assert_eq!(settings.provider.model.as_deref(), Some("llama3"));
        assert_eq!(
            settings.extractor.additional_options,
            vec!["--cookies", "/etc/cookies.txt", "--force-ipv4"]
        );
        assert!(settings.provider.proxy.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [provider]
            model = "gpt-4o-mini"
            timeout_seconds = 45

            [extractor]
            max_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.provider.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(settings.provider.timeout_seconds, 45);
        assert_eq!(settings.provider.max_attempts, 3);
        assert_eq!(settings.extractor.max_attempts, 5);
        assert_eq!(settings.extractor.binary, "yt-dlp");
    }

    #[test]
    fn test_redacted_hides_key() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("sk-secret".to_string());
        let shown = toml::to_string_pretty(&settings.redacted()).unwrap();
        assert!(!shown.contains("sk-secret"));
    }
}
