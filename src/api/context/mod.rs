// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context and chat endpoints
//!
//! Provides `/context/create_context`, `/context/:id`, `/context/chat` and
//! `/context/page_summary`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    chat_handler, create_context_handler, get_context_handler, page_summary_handler,
};
pub use request::{ChatRequest, CreateContextRequest, PageSummaryRequest};
pub use response::{ChatResponse, CreateContextResponse};
