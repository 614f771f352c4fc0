// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::context::{
    chat_handler, create_context_handler, get_context_handler, page_summary_handler,
};
use super::links::{
    delete_link_handler, delete_links_handler, save_user_link_handler, user_links_handler,
};
use super::sso::callback_handler;
use super::users::{
    create_user_handler, delete_account_handler, get_user_handler, google_sso_handler,
    list_users_handler,
};
use crate::auth::IdentityProvider;
use crate::chat::ChatOrchestrator;
use crate::context::ContextBuilder;
use crate::store::Store;

/// Where the browser lands after the SSO callback
#[derive(Debug, Clone)]
pub struct LoginRedirects {
    pub success: String,
    pub failure: String,
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub context_builder: Arc<ContextBuilder>,
    pub chat: Arc<ChatOrchestrator>,
    pub identity: Arc<dyn IdentityProvider>,
    pub redirects: LoginRedirects,
}

/// Build the router with every endpoint mounted
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Users
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/delete_account", post(delete_account_handler))
        .route("/users/google_sso", get(google_sso_handler))
        .route("/users/:id", get(get_user_handler))
        // SSO callback
        .route("/auth/callback", get(callback_handler))
        // Links
        .route("/links/user_links", get(user_links_handler))
        .route("/links/save_user_link", post(save_user_link_handler))
        .route("/links/delete_links", post(delete_links_handler))
        .route("/links/:id", delete(delete_link_handler))
        // Contexts and chat
        .route("/context/create_context", post(create_context_handler))
        .route("/context/chat", post(chat_handler))
        .route("/context/page_summary", post(page_summary_handler))
        .route("/context/:id", get(get_context_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::version::VERSION_NUMBER,
    }))
}
