// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

use axum::http::StatusCode;
use context_links::api::RATE_LIMIT_MESSAGE;
use context_links::chat::ChatModelError;
use context_links::store::{ContextId, NewContext, Store};
use serde_json::json;

use super::common::*;

const TPM_ERROR: &str = "Rate limit reached for model `mixtral-8x7b-32768` in organization \
    `org_x` on tokens per minute (TPM): Limit 5000, Used 4800, Requested 900. \
    Please try again in 2m30.5s.";

async fn seed_context(test: &TestApp) -> ContextId {
    let user = seed_user(&test.store, "ada@example.com").await;
    test.store
        .create_context(NewContext {
            user_id: user.id,
            link_ids: vec![],
            context: "Link: https://ok.example/a, Parsed content: Hello, ".to_string(),
        })
        .await
        .unwrap()
        .id
}

fn rate_limited() -> ChatModelError {
    ChatModelError::Api {
        status: 429,
        message: TPM_ERROR.to_string(),
    }
}

#[tokio::test]
async fn test_chat_returns_ai_response() {
    let test = test_app(ScriptedModel::replying(Ok("The page says Hello".to_string())));
    let context_id = seed_context(&test).await;

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": context_id, "user_input": "What does it say?"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_response"], "The page says Hello");

    let prompt = test.model.last_prompt().unwrap();
    assert_eq!(
        prompt.system,
        "Context: Link: https://ok.example/a, Parsed content: Hello, "
    );
    assert_eq!(prompt.human, "What does it say?");
}

#[tokio::test]
async fn test_chat_unknown_context_is_not_found() {
    let test = test_app(ScriptedModel::default());

    let (status, _, body) = send(
        &test.app,
        json_request("POST", "/context/chat", json!({"context_id": 999, "user_input": "hi"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
    assert_eq!(test.model.calls(), 0);
}

#[tokio::test]
async fn test_chat_validation_makes_no_model_call() {
    let test = test_app(ScriptedModel::default());
    let context_id = seed_context(&test).await;

    for body in [
        json!({"context_id": context_id, "user_input": ""}),
        json!({"context_id": context_id, "user_input": "   "}),
        json!({"user_input": "hi"}),
        json!({"context_id": context_id}),
    ] {
        let (status, _, response) =
            send(&test.app, json_request("POST", "/context/chat", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error_type"], "validation_error");
    }

    assert_eq!(test.model.calls(), 0);
}

#[tokio::test]
async fn test_chat_rate_limit_returns_429_with_retry_after() {
    let test = test_app(ScriptedModel::replying(Err(rate_limited())));
    let context_id = seed_context(&test).await;

    let (status, headers, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": context_id, "user_input": "hi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(headers["retry-after"], "150");
    assert_eq!(body["message"], RATE_LIMIT_MESSAGE);
    assert_eq!(body["details"]["retry_after"], 150);
    assert_eq!(body["details"]["cooldown_period"], "10 minutes");
}

#[tokio::test]
async fn test_chat_rate_limit_without_duration_uses_default_cooldown() {
    let test = test_app(ScriptedModel::replying(Err(ChatModelError::Api {
        status: 429,
        message: "Rate limit reached on tokens per minute (TPM)".to_string(),
    })));
    let context_id = seed_context(&test).await;

    let (status, headers, _) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": context_id, "user_input": "hi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(headers["retry-after"], "600");
}

#[tokio::test]
async fn test_chat_upstream_error_is_sanitized() {
    let test = test_app(ScriptedModel::replying(Err(ChatModelError::Api {
        status: 500,
        message: "internal stack trace at node-17".to_string(),
    })));
    let context_id = seed_context(&test).await;

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": context_id, "user_input": "hi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_type"], "upstream_error");
    assert!(!body.to_string().contains("node-17"));
}

#[tokio::test]
async fn test_chat_model_timeout_is_gateway_timeout() {
    let test = test_app(ScriptedModel::replying(Err(ChatModelError::Timeout(60))));
    let context_id = seed_context(&test).await;

    let (status, _, _) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": context_id, "user_input": "hi"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_page_summary_returns_ai_response() {
    let test = test_app(ScriptedModel::replying(Ok("A greeting".to_string())));

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/page_summary",
            json!({"link": "https://ok.example/post"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_response"], "A greeting");
    assert_eq!(
        test.model.last_prompt().unwrap().system,
        "Context: Link: https://ok.example/post, Parsed content: Hello, "
    );
}

#[tokio::test]
async fn test_page_summary_rate_limit_matches_chat_contract() {
    let test = test_app(ScriptedModel::replying(Err(rate_limited())));

    let (status, headers, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/page_summary",
            json!({"link": "https://ok.example/post"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(headers["retry-after"], "150");
    assert_eq!(body["message"], RATE_LIMIT_MESSAGE);
    assert_eq!(body["details"]["cooldown_period"], "10 minutes");
}

#[tokio::test]
async fn test_page_summary_requires_link() {
    let test = test_app(ScriptedModel::default());

    let (status, _, _) = send(
        &test.app,
        json_request("POST", "/context/page_summary", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(test.model.calls(), 0);
}

#[tokio::test]
async fn test_chat_malformed_json_is_structured_bad_request() {
    let test = test_app(ScriptedModel::default());

    let (status, _, body) = send(
        &test.app,
        raw_request(
            "POST",
            "/context/chat",
            Some("application/json"),
            "{\"context_id\": 1,",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
    assert_eq!(test.model.calls(), 0);
}

#[tokio::test]
async fn test_chat_wrong_field_type_is_structured_bad_request() {
    let test = test_app(ScriptedModel::default());

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/context/chat",
            json!({"context_id": "1", "user_input": "hi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_chat_missing_content_type_is_structured_bad_request() {
    let test = test_app(ScriptedModel::default());

    let (status, _, body) = send(
        &test.app,
        raw_request(
            "POST",
            "/context/chat",
            None,
            r#"{"context_id": 1, "user_input": "hi"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
    assert_eq!(test.model.calls(), 0);
}
