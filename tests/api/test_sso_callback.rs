// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

use axum::http::{header, HeaderMap, StatusCode};
use context_links::auth::Identity;
use context_links::store::Store;

use super::common::*;

fn cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_callback_registers_user_and_sets_cookies() {
    let test = test_app(ScriptedModel::default());

    let (status, headers, _) = send(
        &test.app,
        empty_request("GET", &format!("/auth/callback?code={}", GOOD_CODE)),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/index/");

    let cookies = cookies(&headers);
    assert_eq!(cookies.len(), 3);
    assert!(cookies.iter().any(|c| c.starts_with("user_email=ada@example.com")));
    assert!(cookies.iter().any(|c| c.starts_with("user_first_name=Ada")));
    assert!(cookies.iter().any(|c| c.starts_with("user_last_name=Lovelace")));
    assert!(cookies
        .iter()
        .all(|c| c.contains("HttpOnly") && c.contains("Secure") && c.contains("SameSite=Lax")));

    let user = test
        .store
        .find_user_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Ada");
}

#[tokio::test]
async fn test_email_cookie_reads_back_as_stored_email() {
    let test = test_app(ScriptedModel::default());

    let (_, headers, _) = send(
        &test.app,
        empty_request("GET", &format!("/auth/callback?code={}", GOOD_CODE)),
    )
    .await;

    let email = cookies(&headers)
        .iter()
        .find_map(|c| c.strip_prefix("user_email="))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
        .unwrap();
    assert_eq!(email, "ada@example.com");

    let (status, _, body) = send(
        &test.app,
        empty_request("GET", &format!("/links/user_links?email={}", email)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_repeat_login_keeps_single_user() {
    let test = test_app(ScriptedModel::default());
    let uri = format!("/auth/callback?code={}", GOOD_CODE);

    send(&test.app, empty_request("GET", &uri)).await;
    let (status, _, _) = send(&test.app, empty_request("GET", &uri)).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(test.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_exchange_redirects_to_error_page() {
    let test = test_app(ScriptedModel::default());

    let (status, headers, _) = send(
        &test.app,
        empty_request("GET", "/auth/callback?code=forged"),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/loginError.html/");
    assert!(cookies(&headers).is_empty());
    assert!(test.store.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_code_redirects_to_error_page() {
    let test = test_app(ScriptedModel::default());

    let (status, headers, _) = send(&test.app, empty_request("GET", "/auth/callback")).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/loginError.html/");
    assert!(cookies(&headers).is_empty());
}

#[tokio::test]
async fn test_invalid_identity_creates_no_user() {
    let test = test_app_with_identity(
        ScriptedModel::default(),
        Identity {
            email: "not-an-email".to_string(),
            given_name: "X".to_string(),
            family_name: "Y".to_string(),
        },
    );

    let (status, headers, _) = send(
        &test.app,
        empty_request("GET", &format!("/auth/callback?code={}", GOOD_CODE)),
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/loginError.html/");
    assert!(test.store.list_users().await.unwrap().is_empty());
}
