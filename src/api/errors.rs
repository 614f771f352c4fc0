// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::error;

use crate::chat::{ChatError, COOLDOWN_DISPLAY};
use crate::context::ContextError;
use crate::store::StoreError;

pub const RATE_LIMIT_MESSAGE: &str = "Token limit reached. Please try again later.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NotFound(String),
    InvalidRequest(String),
    ValidationError {
        field: String,
        message: String,
    },
    Conflict(String),
    RateLimitExceeded {
        retry_after: u64,
    },
    /// Model call failed; only the upstream status is exposed
    UpstreamError {
        status: Option<u16>,
    },
    InternalError(String),
    Timeout,
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::Conflict(msg) => ("conflict", msg.clone(), None),
            ApiError::RateLimitExceeded { retry_after } => {
                let mut details = HashMap::new();
                details.insert(
                    "retry_after".to_string(),
                    serde_json::Value::Number((*retry_after).into()),
                );
                details.insert(
                    "cooldown_period".to_string(),
                    serde_json::Value::String(COOLDOWN_DISPLAY.to_string()),
                );
                (
                    "rate_limit_exceeded",
                    RATE_LIMIT_MESSAGE.to_string(),
                    Some(details),
                )
            }
            ApiError::UpstreamError { status } => {
                let details = status.map(|code| {
                    let mut details = HashMap::new();
                    details.insert(
                        "upstream_status".to_string(),
                        serde_json::Value::Number(code.into()),
                    );
                    details
                });
                (
                    "upstream_error",
                    "The AI service failed to process the request".to_string(),
                    details,
                )
            }
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
            ApiError::Timeout => ("timeout", "Request timed out".to_string(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::InvalidRequest(_) | ApiError::ValidationError { .. } => 400,
            ApiError::Conflict(_) => 409,
            ApiError::RateLimitExceeded { .. } => 429,
            ApiError::UpstreamError { .. } => 502,
            ApiError::InternalError(_) => 500,
            ApiError::Timeout => 504,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::RateLimitExceeded { retry_after } => write!(
                f,
                "Rate limit exceeded, retry after {} seconds",
                retry_after
            ),
            ApiError::UpstreamError { status: Some(code) } => {
                write!(f, "Upstream error (status {})", code)
            }
            ApiError::UpstreamError { status: None } => write!(f, "Upstream error"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.to_response())).into_response();

        if let ApiError::RateLimitExceeded { retry_after } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail { email } => {
                ApiError::Conflict(format!("User with email {} already exists", email))
            }
            StoreError::UserNotFound(id) => ApiError::NotFound(format!("User {} not found", id)),
            StoreError::ForeignLink { link_id, .. } => ApiError::validation(
                "link_ids",
                format!("Link {} does not belong to this user", link_id),
            ),
            StoreError::Invalid { field, message } => ApiError::ValidationError { field, message },
            StoreError::Backend(msg) => {
                error!("Store failure: {}", msg);
                ApiError::InternalError("Storage failure".to_string())
            }
        }
    }
}

impl From<ContextError> for ApiError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Validation { field, message } => {
                ApiError::ValidationError { field, message }
            }
            ContextError::UserNotFound(who) => ApiError::NotFound(format!("User {} not found", who)),
            ContextError::Store(e) => e.into(),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation { field, message } => ApiError::ValidationError { field, message },
            ChatError::ContextNotFound(id) => {
                ApiError::NotFound(format!("Context with id {} not found", id))
            }
            ChatError::RateLimited { retry_after_secs } => ApiError::RateLimitExceeded {
                retry_after: retry_after_secs,
            },
            ChatError::Upstream { status, .. } => ApiError::UpstreamError { status },
            ChatError::Timeout(_) => ApiError::Timeout,
            ChatError::Store(e) => e.into(),
        }
    }
}
