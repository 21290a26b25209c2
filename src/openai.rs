//! OpenAI-compatible client construction.

use crate::config::ProviderConfig;
use crate::error::{BrieflyError, Result};
use async_openai::{config::OpenAIConfig, Client};

/// Create a chat-completion client for the configured endpoint.
///
/// The HTTP client carries the per-attempt timeout and optional proxy, so any
/// server speaking the OpenAI chat-completion shape (OpenAI, Ollama, vLLM,
/// OpenRouter, ...) can be used.
pub fn create_client(config: &ProviderConfig) -> Result<Client<OpenAIConfig>> {
    let mut builder = reqwest::Client::builder().timeout(config.timeout);

    if let Some(proxy) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| BrieflyError::Config(format!("invalid proxy URL {proxy:?}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    let http_client = builder
        .build()
        .map_err(|e| BrieflyError::Config(format!("failed to create HTTP client: {e}")))?;

    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.base_url)
        .with_api_key(&config.api_key);

    Ok(Client::with_config(openai_config).with_http_client(http_client))
}
