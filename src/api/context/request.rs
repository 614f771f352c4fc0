// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context API request types
//!
//! Fields are optional at the serde level so that a missing field becomes a
//! 400 validation error rather than a body rejection.

use serde::{Deserialize, Serialize};

use crate::store::{ContextId, LinkId};

/// Request body for POST /context/create_context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContextRequest {
    pub email: Option<String>,
    #[serde(default)]
    pub link_ids: Vec<LinkId>,
}

/// Request body for POST /context/chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub context_id: Option<ContextId>,
    pub user_input: Option<String>,
}

/// Request body for POST /context/page_summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSummaryRequest {
    pub link: Option<String>,
}
