// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod content;
pub mod context;
pub mod store;
pub mod version;

// Re-export main types
pub use api::{create_app, start_server, ApiError, AppState};
pub use chat::{ChatError, ChatModel, ChatOrchestrator, OpenAiCompatibleClient};
pub use config::AppConfig;
pub use content::{HttpLinkFetcher, LinkFetcher};
pub use context::{ContextBuilder, ContextError};
pub use store::{InMemoryStore, Store};
