// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the chat-completion backend and prompt

use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_SYSTEM_TEMPLATE: &str =
    "Answer the user's questions using only the following context.\n\n{text}";
pub const DEFAULT_HUMAN_TEMPLATE: &str = "{user_input}";

/// Configuration for chat completions
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Timeout for a single completion call in seconds (default: 60)
    pub request_timeout_secs: u64,
    /// System message template; `{text}` is the context text
    pub system_template: String,
    /// Human message template; `{user_input}` is the utterance
    pub human_template: String,
    /// Whether `{user_input}` is filled in (default: false)
    pub include_user_input: bool,
}

impl ChatConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: env::var("CHAT_API_BASE").unwrap_or(defaults.api_base),
            api_key: env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("CHAT_MODEL").unwrap_or(defaults.model),
            temperature: env::var("CHAT_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
            max_tokens: env::var("CHAT_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok()),
            request_timeout_secs: env::var("CHAT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            system_template: env::var("CHAT_SYSTEM_TEMPLATE").unwrap_or(defaults.system_template),
            human_template: env::var("CHAT_HUMAN_TEMPLATE").unwrap_or(defaults.human_template),
            include_user_input: env::var("CHAT_INCLUDE_USER_INPUT")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_none() {
            return Err("GROQ_API_KEY must be set".to_string());
        }
        if self.api_base.trim().is_empty() {
            return Err("api_base cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0 and 2".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            request_timeout_secs: 60,
            system_template: DEFAULT_SYSTEM_TEMPLATE.to_string(),
            human_template: DEFAULT_HUMAN_TEMPLATE.to_string(),
            include_user_input: false,
        }
    }
}
