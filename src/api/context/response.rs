// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context API response types

use serde::{Deserialize, Serialize};

use crate::store::ContextId;

/// Response body for POST /context/create_context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateContextResponse {
    pub context_id: ContextId,
}

/// Response body for POST /context/chat and /context/page_summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub ai_response: String,
}
