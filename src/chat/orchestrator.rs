// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat orchestration
//!
//! Loads a stored context (or fetches a single page), renders the prompt,
//! invokes the model and classifies any failure.
//!
//! ```text
//! INIT → LOAD_CONTEXT → NOT_FOUND
//!                     → INVOKE_MODEL → SUCCESS | RATE_LIMITED | OTHER_ERROR
//! ```

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{error, info, warn};
use url::Url;

use super::client::{ChatModel, ChatModelError};
use super::prompt::PromptTemplate;
use super::rate_limit::RateLimitClassifier;
use crate::context::{concatenate, ContextBuilder};
use crate::store::{ContextId, Store, StoreError};

/// Terminal failure states of a chat call
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required field is missing or empty; no upstream call was made
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Context not found: {0}")]
    ContextNotFound(ContextId),

    /// Upstream token throttling
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Any other model failure; `message` is the raw upstream text
    #[error("AI processing failed: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Chat completion timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChatError {
    fn missing(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }
}

/// Drives chat turns against stored contexts
pub struct ChatOrchestrator {
    store: Arc<dyn Store>,
    model: Arc<dyn ChatModel>,
    classifier: Arc<dyn RateLimitClassifier>,
    context_builder: Arc<ContextBuilder>,
    prompt: PromptTemplate,
    invoke_timeout: Duration,
}

impl ChatOrchestrator {
    pub fn new(
        store: Arc<dyn Store>,
        model: Arc<dyn ChatModel>,
        classifier: Arc<dyn RateLimitClassifier>,
        context_builder: Arc<ContextBuilder>,
        prompt: PromptTemplate,
        invoke_timeout: Duration,
    ) -> Self {
        if !prompt.include_user_input {
            warn!("Chat prompts exclude user input; set CHAT_INCLUDE_USER_INPUT=true to send it");
        }
        Self {
            store,
            model,
            classifier,
            context_builder,
            prompt,
            invoke_timeout,
        }
    }

    /// Answer `user_input` against the stored context `context_id`
    ///
    /// Both fields are required; validation happens before any lookup or
    /// model call.
    pub async fn chat(
        &self,
        context_id: Option<ContextId>,
        user_input: Option<&str>,
    ) -> Result<String, ChatError> {
        let context_id = context_id.ok_or_else(|| ChatError::missing("context_id"))?;
        let user_input = user_input
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ChatError::missing("user_input"))?;

        let context = match self.store.get_context(context_id).await? {
            Some(context) => context,
            None => {
                error!("Context with id {} not found.", context_id);
                return Err(ChatError::ContextNotFound(context_id));
            }
        };
        info!("Successfully retrieved context for context_id: {}", context_id);

        self.invoke_model(&context.context, user_input).await
    }

    /// Summarise a single freshly fetched page
    ///
    /// A failed fetch still invokes the model with the failure fragment.
    pub async fn page_summary(&self, link: Option<&str>) -> Result<String, ChatError> {
        let link = link
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ChatError::missing("link"))?;
        if Url::parse(link).is_err() {
            return Err(ChatError::Validation {
                field: "link".to_string(),
                message: "link must be an absolute URL".to_string(),
            });
        }

        let fragment = self.context_builder.fetch_fragment(link.to_string()).await;
        self.invoke_model(&concatenate(&[fragment]), "").await
    }

    async fn invoke_model(&self, text: &str, user_input: &str) -> Result<String, ChatError> {
        let prompt = self.prompt.render(text, user_input);

        let outcome = match timeout(self.invoke_timeout, self.model.invoke(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ChatModelError::Timeout(self.invoke_timeout.as_secs())),
        };

        match outcome {
            Ok(reply) => {
                info!("AI response successfully generated ({} chars)", reply.len());
                Ok(reply)
            }
            Err(e) => Err(self.classify_failure(e)),
        }
    }

    fn classify_failure(&self, err: ChatModelError) -> ChatError {
        let error_message = err.to_string();
        error!("AI processing failed: {}", error_message);

        let classification = self.classifier.classify(&error_message);
        if classification.is_rate_limit {
            return ChatError::RateLimited {
                retry_after_secs: classification.retry_after_seconds,
            };
        }

        match err {
            ChatModelError::Timeout(secs) => ChatError::Timeout(secs),
            other => ChatError::Upstream {
                status: other.upstream_status(),
                message: error_message,
            },
        }
    }
}
