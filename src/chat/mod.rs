// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat over stored contexts
//!
//! ## Architecture
//!
//! ```text
//! Context text → PromptTemplate → ChatModel → reply
//!                                     ↓ (error)
//!                          RateLimitClassifier → RateLimited | Upstream
//! ```

pub mod client;
pub mod config;
pub mod orchestrator;
pub mod prompt;
pub mod rate_limit;

pub use client::{ChatModel, ChatModelError, OpenAiCompatibleClient};
pub use config::ChatConfig;
pub use orchestrator::{ChatError, ChatOrchestrator};
pub use prompt::{ChatPrompt, PromptTemplate};
pub use rate_limit::{
    RateLimitClassification, RateLimitClassifier, TpmMessageClassifier, COOLDOWN_DISPLAY,
    DEFAULT_COOLDOWN_SECS,
};
