//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{LlmError, LlmResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// API key (bearer token)
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token cap per call
    pub max_completion_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
}

impl ChatConfig {
    /// Create config from environment variables.
    ///
    /// The completion cap defaults to the per-window token budget divided by
    /// the per-window request budget, so a full window of maximal responses
    /// stays inside the token budget.
    pub fn from_env() -> LlmResult<Self> {
        let api_key = std::env::var("RECAP_LLM_API_KEY")
            .map_err(|_| LlmError::Config("RECAP_LLM_API_KEY not set".to_string()))?;

        let max_requests: u32 = std::env::var("RECAP_MAX_REQUESTS_PER_MINUTE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let max_tokens: u32 = std::env::var("RECAP_MAX_TOKENS_PER_MINUTE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(6000);

        Ok(Self {
            base_url: std::env::var("RECAP_LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            api_key,
            model: std::env::var("RECAP_LLM_MODEL")
                .unwrap_or_else(|_| "llama3-70b-8192".to_string()),
            temperature: std::env::var("RECAP_LLM_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.3),
            max_completion_tokens: max_tokens / max_requests.max(1),
            timeout: Duration::from_secs(
                std::env::var("RECAP_LLM_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }
}

/// Client for the upstream classification model.
pub struct ChatClient {
    http: Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Create a new chat client.
    pub fn new(config: ChatConfig) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(ChatConfig::from_env()?)
    }

    /// Send one system+user prompt pair and return the raw completion text.
    ///
    /// Transport failures propagate to the caller; there is no retry here —
    /// a failed classification call aborts the batch.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> LlmResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_completion_tokens,
        };

        debug!(model = %self.config.model, "Sending classification request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::Network)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!(
                "Classification endpoint returned {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(LlmError::Network)?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        Ok(content.to_string())
    }
}
