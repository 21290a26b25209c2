//! Chat-completion summarizer for OpenAI-compatible endpoints.

use super::Summarizer;
use crate::config::{Prompts, ProviderConfig};
use crate::error::{BrieflyError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Summarizer backed by a single chat-completion request per attempt.
pub struct OpenAISummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    config: ProviderConfig,
    prompts: Prompts,
}

impl OpenAISummarizer {
    pub fn new(config: ProviderConfig, prompts: Prompts) -> Result<Self> {
        let client = create_client(&config)?;
        Ok(Self {
            client,
            config,
            prompts,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, prompt: String) -> Result<CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| BrieflyError::Provider(e.to_string()))?
                .into(),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .build()
            .map_err(|e| BrieflyError::Provider(e.to_string()))
    }

    /// Send the request, retrying any failure up to the attempt budget.
    ///
    /// The timeout bounds each attempt separately.
    async fn complete(
        &self,
        request: CreateChatCompletionRequest,
    ) -> Result<CreateChatCompletionResponse> {
        let attempts = self.config.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            let chat = self.client.chat();
            let call = chat.create(request.clone());
            match tokio::time::timeout(self.config.timeout, call).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(e)) => {
                    warn!(attempt, max_attempts = attempts, error = %e, "Chat completion failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        timeout = ?self.config.timeout,
                        "Chat completion timed out"
                    );
                    last_error = format!("request timed out after {:?}", self.config.timeout);
                }
            }
        }

        Err(BrieflyError::Provider(format!(
            "{last_error} (gave up after {attempts} attempts)"
        )))
    }
}

#[async_trait]
impl Summarizer for OpenAISummarizer {
    #[instrument(skip(self, text), fields(model = %self.config.model, chars = text.len()))]
    async fn summarize(&self, text: &str, language: &str) -> Result<String> {
        let prompt = self.prompts.summary_prompt(language, text);
        let request = self.build_request(prompt)?;

        debug!("Requesting summary");
        let response = self.complete(request).await?;

        let summary = extract_summary(response, &self.config.model)?;
        debug!(chars = summary.len(), "Summary received");
        Ok(summary)
    }
}

/// Text of the first candidate; a missing or blank candidate is an error.
fn extract_summary(response: CreateChatCompletionResponse, model: &str) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| BrieflyError::EmptyResponse {
            model: model.to_string(),
        })
}
