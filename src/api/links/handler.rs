// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link endpoint handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::request::{DeleteLinksRequest, SaveUserLinkRequest, UserLinksQuery};
use super::response::{DeleteLinksResponse, LinkSummary, SaveUserLinkResponse};
use crate::api::http_server::AppState;
use crate::api::{ApiError, ApiJson};
use crate::store::{LinkId, NewUserLink, User};

async fn user_by_email(state: &AppState, email: &str) -> Result<User, ApiError> {
    state
        .store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", email)))
}

/// GET /links/user_links?email= - Links owned by a user, ordered by id
pub async fn user_links_handler(
    State(state): State<AppState>,
    Query(query): Query<UserLinksQuery>,
) -> Result<Json<Vec<LinkSummary>>, ApiError> {
    let user = user_by_email(&state, &query.email()?).await?;
    let links = state.store.links_for_user(user.id).await?;
    debug!("Found {} links for user {}", links.len(), user.id);
    Ok(Json(links.into_iter().map(LinkSummary::from).collect()))
}

/// POST /links/save_user_link
///
/// # Errors
/// - 400 Bad Request: missing email, empty name, or non-http(s) link
/// - 404 Not Found: unknown user
pub async fn save_user_link_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SaveUserLinkRequest>,
) -> Result<(StatusCode, Json<SaveUserLinkResponse>), ApiError> {
    let email = request.email()?;
    let user = user_by_email(&state, &email).await?;

    let new_link = NewUserLink {
        name: request.name.unwrap_or_default().trim().to_string(),
        user_id: user.id,
        link: request.link.unwrap_or_default().trim().to_string(),
    };
    new_link.validate()?;

    let link = state.store.create_link(new_link).await?;
    info!("Saved link {} for user {}", link.id, user.id);
    Ok((
        StatusCode::CREATED,
        Json(SaveUserLinkResponse {
            success: "Link saved".to_string(),
            link,
        }),
    ))
}

/// POST /links/delete_links - Batch delete by id
pub async fn delete_links_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DeleteLinksRequest>,
) -> Result<Json<DeleteLinksResponse>, ApiError> {
    request.validate()?;

    let deleted = state.store.delete_links(&request.link_ids).await?;
    if deleted == 0 {
        return Err(ApiError::InvalidRequest(
            "No links found for the given ids".to_string(),
        ));
    }
    info!("Deleted {} links", deleted);
    Ok(Json(DeleteLinksResponse {
        success: format!("{} links deleted successfully.", deleted),
        deleted,
    }))
}

/// DELETE /links/:id
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<LinkId>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_links(&[id]).await? {
        0 => Err(ApiError::NotFound(format!("Link {} not found", id))),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
