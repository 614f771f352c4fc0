// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

use axum::http::StatusCode;
use context_links::store::{NewContext, Store};
use serde_json::json;

use super::common::*;

#[tokio::test]
async fn test_health_reports_version() {
    let test = test_app(ScriptedModel::default());
    let (status, _, body) = send(&test.app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], context_links::version::VERSION_NUMBER);
}

#[tokio::test]
async fn test_register_user_then_get_and_list() {
    let test = test_app(ScriptedModel::default());

    let (status, _, created) = send(
        &test.app,
        json_request(
            "POST",
            "/users",
            json!({"email": "Ada@Example.COM", "first_name": "Ada", "last_name": "Lovelace"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "Ada@example.com");
    assert_eq!(created["is_active"], true);

    let id = created["id"].as_u64().unwrap();
    let (status, _, fetched) = send(&test.app, empty_request("GET", &format!("/users/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["first_name"], "Ada");

    let (status, _, listed) = send(&test.app, empty_request("GET", "/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let test = test_app(ScriptedModel::default());
    seed_user(&test.store, "ada@example.com").await;

    let (status, _, body) = send(
        &test.app,
        json_request("POST", "/users", json!({"email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_type"], "conflict");
}

#[tokio::test]
async fn test_register_invalid_user_is_rejected() {
    let test = test_app(ScriptedModel::default());

    let (status, _, body) = send(&test.app, json_request("POST", "/users", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "email");

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/users",
            json!({"email": "ada@example.com", "last_name": "L".repeat(40)}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "last_name");
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let test = test_app(ScriptedModel::default());
    let (status, _, body) = send(&test.app, empty_request("GET", "/users/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_delete_account_cascades() {
    let test = test_app(ScriptedModel::default());
    let user = seed_user(&test.store, "ada@example.com").await;
    let link = seed_link(&test.store, &user, "https://ok.example/a").await;
    let context = test
        .store
        .create_context(NewContext {
            user_id: user.id,
            link_ids: vec![link.id],
            context: "Link: https://ok.example/a, ".to_string(),
        })
        .await
        .unwrap();

    let (status, _, body) = send(
        &test.app,
        json_request(
            "POST",
            "/users/delete_account",
            json!({"email": "\"ada@example.com\""}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "User Deleted!");

    assert!(test.store.get_user(user.id).await.unwrap().is_none());
    assert!(test.store.links_for_user(user.id).await.unwrap().is_empty());
    assert!(test.store.get_context(context.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_account_unknown_or_missing_email() {
    let test = test_app(ScriptedModel::default());

    let (status, _, _) = send(
        &test.app,
        json_request("POST", "/users/delete_account", json!({"email": "ghost@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(
        &test.app,
        json_request("POST", "/users/delete_account", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_google_sso_redirects_to_consent_page() {
    let test = test_app(ScriptedModel::default());
    let (status, headers, _) = send(&test.app, empty_request("GET", "/users/google_sso")).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(headers["location"]
        .to_str()
        .unwrap()
        .starts_with("https://accounts.example.com/auth"));
}
