// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Records kept by the storage collaborator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type UserId = u64;
pub type LinkId = u64;
pub type ContextId = u64;

/// Maximum length of an email address
pub const MAX_EMAIL_LEN: usize = 255;
/// Maximum length of a first or last name
pub const MAX_NAME_LEN: usize = 30;
/// Maximum length of a link's display name
pub const MAX_LINK_NAME_LEN: usize = 255;

/// A registered user, keyed by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub is_active: bool,
    pub is_admin: bool,
}

/// Fields needed to register a user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A saved web link owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLink {
    pub id: LinkId,
    pub name: String,
    pub user_id: UserId,
    pub link: String,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserLink {
    pub name: String,
    pub user_id: UserId,
    pub link: String,
}

/// Aggregated page text built from a set of a user's links
///
/// Write-once: there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub id: ContextId,
    pub created_on: NaiveDate,
    pub user_id: UserId,
    pub link_ids: Vec<LinkId>,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContext {
    pub user_id: UserId,
    pub link_ids: Vec<LinkId>,
    pub context: String,
}

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User already exists: {email}")]
    DuplicateEmail { email: String },

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Link {link_id} does not belong to user {user_id}")]
    ForeignLink { link_id: LinkId, user_id: UserId },

    #[error("Invalid {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl NewUser {
    /// Check the email shape and name lengths before insertion
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_email(&self.email).map_err(|m| StoreError::invalid("email", m))?;
        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            if value.chars().count() > MAX_NAME_LEN {
                return Err(StoreError::invalid(
                    field,
                    format!("{} too long (max {} characters)", field, MAX_NAME_LEN),
                ));
            }
        }
        Ok(())
    }
}

impl NewUserLink {
    /// Links need a display name and an absolute http(s) URL
    pub fn validate(&self) -> Result<(), StoreError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err(StoreError::invalid("name", "name is required"));
        }
        if name_len > MAX_LINK_NAME_LEN {
            return Err(StoreError::invalid(
                "name",
                format!("name too long (max {} characters)", MAX_LINK_NAME_LEN),
            ));
        }
        match url::Url::parse(self.link.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(StoreError::invalid(
                "link",
                "link must be an absolute http or https URL",
            )),
        }
    }
}

/// Normalise an email the way every lookup expects it
///
/// Trims whitespace, strips the JSON quoting browsers leave on cookie values
/// and lower-cases the domain part.
pub fn normalize_email(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"').trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}

/// Validate a normalised email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("Email too long (max {} characters)", MAX_EMAIL_LEN));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Email must be of the form name@domain".to_string()),
    }
}
