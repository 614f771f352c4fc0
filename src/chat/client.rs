// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat-completion client for OpenAI-compatible APIs (Groq by default)

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::config::ChatConfig;
use super::prompt::ChatPrompt;

/// Errors from the chat-completion service
///
/// `Display` keeps the vendor's message text intact; rate-limit
/// classification reads it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatModelError {
    /// Non-success response from the API
    #[error("Error code: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request did not finish within the configured timeout
    #[error("Chat completion timed out after {0}s")]
    Timeout(u64),

    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ChatModelError {
    /// HTTP status reported by the upstream, if any
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// External chat-completion collaborator
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a system + human prompt and return the model's text
    async fn invoke(&self, prompt: &ChatPrompt) -> Result<String, ChatModelError>;
}

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(serde::Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(serde::Deserialize)]
struct CompletionChoice {
    message: CompletionResponseMessage,
}

#[derive(serde::Deserialize)]
struct CompletionResponseMessage {
    content: Option<String>,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(serde::Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// [`ChatModel`] speaking the `/chat/completions` protocol
pub struct OpenAiCompatibleClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout_secs: u64,
}

impl OpenAiCompatibleClient {
    /// Create a new client; fails when no API key is configured
    pub fn new(config: &ChatConfig) -> Result<Self, ChatModelError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ChatModelError::Transport("no API key configured".to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ChatModelError::Transport(e.to_string()))?;

        let endpoint = format!(
            "{}/chat/completions",
            config.api_base.trim_end_matches('/')
        );
        info!(
            "Chat client configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_send_error(&self, e: reqwest::Error) -> ChatModelError {
        if e.is_timeout() {
            ChatModelError::Timeout(self.timeout_secs)
        } else {
            ChatModelError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn invoke(&self, prompt: &ChatPrompt) -> Result<String, ChatModelError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: &prompt.system,
                },
                CompletionMessage {
                    role: "user",
                    content: &prompt.human,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("Sending chat completion to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(ChatModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ChatModelError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| ChatModelError::InvalidResponse("no choices returned".to_string()))
    }
}
