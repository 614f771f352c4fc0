// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User API request types

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::store::{normalize_email, NewUser};

/// Request body for POST /users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RegisterUserRequest {
    /// Normalise and validate into a storable user
    pub fn into_new_user(self) -> Result<NewUser, ApiError> {
        let email = self
            .email
            .map(|e| normalize_email(&e))
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::validation("email", "Email is required"))?;

        let new_user = NewUser {
            email,
            first_name: self.first_name.unwrap_or_default().trim().to_string(),
            last_name: self.last_name.unwrap_or_default().trim().to_string(),
        };
        new_user.validate()?;
        Ok(new_user)
    }
}

/// Request body for POST /users/delete_account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    pub email: Option<String>,
}

impl DeleteAccountRequest {
    /// The normalised email, or a validation error when absent
    pub fn email(&self) -> Result<String, ApiError> {
        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::validation("email", "Email is required"))
    }
}
