// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use tracing::{debug, error, info, warn};

use super::request::{DeleteAccountRequest, RegisterUserRequest};
use super::response::{DeleteAccountResponse, UserResponse};
use crate::api::http_server::AppState;
use crate::api::{ApiError, ApiJson};
use crate::store::UserId;

/// GET /users - List every user
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users - Register a user
///
/// # Errors
/// - 400 Bad Request: missing/invalid email or oversized names
/// - 409 Conflict: email already registered
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new_user = request.into_new_user().map_err(|e| {
        warn!("User registration rejected: {}", e);
        e
    })?;
    let user = state.store.create_user(new_user).await?;
    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .store
        .get_user(id)
        .await?
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
}

/// POST /users/delete_account - Delete a user with their links and contexts
pub async fn delete_account_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DeleteAccountRequest>,
) -> Result<Json<DeleteAccountResponse>, ApiError> {
    let email = request.email()?;
    debug!("Deleting account for {}", email);

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".to_string()))?;

    if !state.store.delete_user(user.id).await? {
        return Err(ApiError::NotFound("User not found!".to_string()));
    }
    info!("Deleted user {}", user.id);
    Ok(Json(DeleteAccountResponse {
        success: "User Deleted!".to_string(),
    }))
}

/// GET /users/google_sso - Redirect to the provider's consent page
pub async fn google_sso_handler(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.identity.authorization_url().map_err(|e| {
        error!("Cannot build consent URL: {}", e);
        ApiError::InternalError("SSO is not configured".to_string())
    })?;
    Ok(Redirect::to(&url))
}
