// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context and chat endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};

use super::request::{ChatRequest, CreateContextRequest, PageSummaryRequest};
use super::response::{ChatResponse, CreateContextResponse};
use crate::api::http_server::AppState;
use crate::api::{ApiError, ApiJson};
use crate::store::{Context, ContextId};

/// POST /context/create_context - Build a context from saved links
///
/// # Request
/// - `email`: owner of the links (required)
/// - `link_ids`: ids of saved links; unknown or foreign ids are dropped
///
/// # Errors
/// - 400 Bad Request: missing or invalid email
/// - 404 Not Found: unknown user
pub async fn create_context_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateContextRequest>,
) -> Result<(StatusCode, Json<CreateContextResponse>), ApiError> {
    let email = request
        .email
        .ok_or_else(|| ApiError::validation("email", "Email is required"))?;
    debug!("Create context request for {} links", request.link_ids.len());

    let context = state
        .context_builder
        .build_context_for_email(&email, &request.link_ids)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateContextResponse {
            context_id: context.id,
        }),
    ))
}

/// GET /context/:id - Read back a stored context
pub async fn get_context_handler(
    State(state): State<AppState>,
    Path(id): Path<ContextId>,
) -> Result<Json<Context>, ApiError> {
    state
        .store
        .get_context(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Context with id {} not found", id)))
}

/// POST /context/chat - Ask the model about a stored context
///
/// # Errors
/// - 400 Bad Request: missing `context_id` or empty `user_input`
/// - 404 Not Found: unknown context
/// - 429 Too Many Requests: upstream token limit, with `Retry-After`
/// - 502 Bad Gateway: other model failure
/// - 504 Gateway Timeout: model call timed out
pub async fn chat_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let ai_response = state
        .chat
        .chat(request.context_id, request.user_input.as_deref())
        .await
        .map_err(|e| {
            warn!("Chat failed: {}", e);
            ApiError::from(e)
        })?;

    info!("Chat reply generated for context {:?}", request.context_id);
    Ok(Json(ChatResponse { ai_response }))
}

/// POST /context/page_summary - Summarise one freshly fetched page
///
/// Shares the error contract of `/context/chat`.
pub async fn page_summary_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PageSummaryRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let ai_response = state
        .chat
        .page_summary(request.link.as_deref())
        .await
        .map_err(|e| {
            warn!("Page summary failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(ChatResponse { ai_response }))
}
