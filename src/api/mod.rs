// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod context;
pub mod errors;
pub mod extract;
pub mod http_server;
pub mod links;
pub mod sso;
pub mod users;

pub use context::{ChatRequest, ChatResponse, CreateContextRequest, CreateContextResponse};
pub use errors::{ApiError, ErrorResponse, RATE_LIMIT_MESSAGE};
pub use extract::ApiJson;
pub use http_server::{create_app, start_server, AppState, LoginRedirects};
pub use links::{DeleteLinksResponse, LinkSummary, SaveUserLinkResponse};
pub use users::{DeleteAccountResponse, UserResponse};
