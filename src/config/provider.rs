//! Validated, immutable provider configuration.

use super::Settings;
use crate::error::{BrieflyError, Result};
use std::time::Duration;

/// Everything the summarization client needs to talk to its endpoint.
///
/// Built once at startup; a missing endpoint, credential or model is a
/// startup failure rather than a per-request one.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub proxy: Option<String>,
    pub timeout: Duration,
    pub max_attempts: u32,
}

impl ProviderConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = &settings.provider;
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let base_url = present(&provider.base_url);
        let api_key = present(&provider.api_key);
        let model = present(&provider.model);

        let mut missing = Vec::new();
        if base_url.is_none() {
            missing.push("OPENAI_BASE_URL (provider.base_url)");
        }
        if api_key.is_none() {
            missing.push("OPENAI_API_KEY (provider.api_key)");
        }
        if model.is_none() {
            missing.push("OPENAI_MODEL (provider.model)");
        }

        match (base_url, api_key, model) {
            (Some(base_url), Some(api_key), Some(model)) => {
                if provider.max_attempts == 0 {
                    return Err(BrieflyError::Config(
                        "provider.max_attempts must be at least 1".to_string(),
                    ));
                }
                if provider.timeout_seconds == 0 {
                    return Err(BrieflyError::Config(
                        "provider.timeout_seconds must be at least 1".to_string(),
                    ));
                }

                Ok(Self {
                    base_url: base_url.trim_end_matches('/').to_string(),
                    api_key,
                    model,
                    proxy: present(&provider.proxy),
                    timeout: Duration::from_secs(provider.timeout_seconds),
                    max_attempts: provider.max_attempts,
                })
            }
            _ => Err(BrieflyError::Config(format!(
                "missing required provider settings: {}",
                missing.join(", ")
            ))),
        }
    }
}
