// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for router tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use context_links::api::{create_app, AppState, LoginRedirects};
use context_links::auth::{AuthError, Identity, IdentityProvider};
use context_links::chat::{
    ChatModel, ChatModelError, ChatOrchestrator, ChatPrompt, PromptTemplate,
    TpmMessageClassifier,
};
use context_links::content::{ContentFetchConfig, FetchError, LinkFetcher, PageText};
use context_links::context::ContextBuilder;
use context_links::store::{InMemoryStore, NewUser, NewUserLink, Store, User, UserLink};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

pub const GOOD_CODE: &str = "good-code";

/// Chat model that replays scripted results and counts calls
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ChatModelError>>>,
    prompts: Mutex<Vec<ChatPrompt>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn replying(reply: Result<String, ChatModelError>) -> Self {
        let model = Self::default();
        model.replies.lock().unwrap().push_back(reply);
        model
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<ChatPrompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(&self, prompt: &ChatPrompt) -> Result<String, ChatModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}

/// Pages on `ok.example` contain "Hello"; everything else fails
pub struct FakeFetcher;

#[async_trait]
impl LinkFetcher for FakeFetcher {
    async fn fetch_and_extract(&self, url: &str) -> Result<PageText, FetchError> {
        if url.contains("ok.example") {
            Ok(PageText {
                url: url.to_string(),
                text: "Hello".to_string(),
            })
        } else {
            Err(FetchError::HttpError(format!("connection refused: {}", url)))
        }
    }
}

/// Accepts only [`GOOD_CODE`]
pub struct FakeIdentity {
    pub identity: Identity,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn authorization_url(&self) -> Result<String, AuthError> {
        Ok("https://accounts.example.com/auth?client_id=test&scope=openid".to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<Identity, AuthError> {
        if code == GOOD_CODE {
            Ok(self.identity.clone())
        } else {
            Err(AuthError::TokenExchange("HTTP 400".to_string()))
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryStore>,
    pub model: Arc<ScriptedModel>,
}

pub fn test_app(model: ScriptedModel) -> TestApp {
    test_app_with_identity(
        model,
        Identity {
            email: "ada@example.com".to_string(),
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
        },
    )
}

pub fn test_app_with_identity(model: ScriptedModel, identity: Identity) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let model = Arc::new(model);
    let context_builder = Arc::new(ContextBuilder::new(
        store.clone(),
        Arc::new(FakeFetcher),
        &ContentFetchConfig::default(),
    ));
    let chat = Arc::new(ChatOrchestrator::new(
        store.clone(),
        model.clone(),
        Arc::new(TpmMessageClassifier),
        context_builder.clone(),
        PromptTemplate::new("Context: {text}", "{user_input}", true),
        Duration::from_secs(5),
    ));

    let state = AppState {
        store: store.clone(),
        context_builder,
        chat,
        identity: Arc::new(FakeIdentity { identity }),
        redirects: LoginRedirects {
            success: "/api/index/".to_string(),
            failure: "/api/loginError.html/".to_string(),
        },
    };

    TestApp {
        app: create_app(state),
        store,
        model,
    }
}

pub async fn seed_user(store: &InMemoryStore, email: &str) -> User {
    store
        .create_user(NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        })
        .await
        .unwrap()
}

pub async fn seed_link(store: &InMemoryStore, user: &User, url: &str) -> UserLink {
    store
        .create_link(NewUserLink {
            name: format!("link to {}", url),
            user_id: user.id,
            link: url.to_string(),
        })
        .await
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, headers, body)
}
