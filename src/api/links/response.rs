// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link API response types

use serde::{Deserialize, Serialize};

use crate::store::{LinkId, UserLink};

/// One entry of GET /links/user_links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkSummary {
    pub id: LinkId,
    pub link: String,
    pub name: String,
}

impl From<UserLink> for LinkSummary {
    fn from(link: UserLink) -> Self {
        Self {
            id: link.id,
            link: link.link,
            name: link.name,
        }
    }
}

/// Response body for POST /links/save_user_link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveUserLinkResponse {
    pub success: String,
    pub link: UserLink,
}

/// Response body for POST /links/delete_links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLinksResponse {
    pub success: String,
    pub deleted: usize,
}
