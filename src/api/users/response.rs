// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{User, UserId};

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_joined: user.date_joined,
            last_login: user.last_login,
            is_active: user.is_active,
        }
    }
}

/// Response body for POST /users/delete_account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub success: String,
}
