//! Language-model client.
//!
//! One stateless chat completion per call; no conversation memory is kept
//! between calls.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use textgraph_core::error::{Result, TextGraphError};

use crate::config::LlmConfig;

/// A model that turns a system instruction and a user message into text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Model identifier, for logging.
    fn model_id(&self) -> &str;

    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Chat Completions API client (OpenAI-compatible endpoints).
pub struct OpenAiChatModel {
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiChatModel {
    /// Build a client from configuration. Does not contact the endpoint.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TextGraphError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        })
    }

    fn request_body(&self, system: &str, user: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiChatModel {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TextGraphError::Generation("OPENAI_API_KEY not set".to_string()))?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(api_key)
            .json(&self.request_body(system, user))
            .send()
            .await
            .map_err(|e| TextGraphError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TextGraphError::Generation(format!(
                "API returned status: {status} - {body}"
            )));
        }

        let response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TextGraphError::Generation(format!("Invalid response body: {e}")))?;

        first_choice_content(response)
    }
}

fn first_choice_content(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| TextGraphError::Generation("No choices in response".to_string()))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
