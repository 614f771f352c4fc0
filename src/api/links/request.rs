// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link API request types

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::store::{normalize_email, LinkId};

fn required_email(email: Option<&str>) -> Result<String, ApiError> {
    email
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::validation("email", "Email is required"))
}

/// Query for GET /links/user_links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserLinksQuery {
    pub email: Option<String>,
}

impl UserLinksQuery {
    pub fn email(&self) -> Result<String, ApiError> {
        required_email(self.email.as_deref())
    }
}

/// Request body for POST /links/save_user_link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveUserLinkRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
}

impl SaveUserLinkRequest {
    pub fn email(&self) -> Result<String, ApiError> {
        required_email(self.email.as_deref())
    }
}

/// Request body for POST /links/delete_links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteLinksRequest {
    #[serde(default)]
    pub link_ids: Vec<LinkId>,
}

impl DeleteLinksRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.link_ids.is_empty() {
            return Err(ApiError::validation("link_ids", "No link ids provided"));
        }
        Ok(())
    }
}
