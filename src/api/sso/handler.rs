// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! GET /auth/callback
//!
//! Every failure redirects to the login-error page; only a registered or
//! refreshed user gets identity cookies.

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::http_server::AppState;
use crate::auth::{register_via_sso, AuthError, Identity};
use crate::store::User;

/// Query string sent back by the provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `Set-Cookie` value carrying the raw value
///
/// Values are written unencoded so the email reads back exactly as stored.
fn identity_cookie(name: &'static str, value: String) -> String {
    Cookie::build((name, value))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
        .to_string()
}

async fn login(state: &AppState, query: CallbackQuery) -> Result<(Identity, User), AuthError> {
    if let Some(error) = query.error {
        warn!("Provider returned an error: {}", error);
        return Err(AuthError::MissingCode);
    }
    let code = query.code.ok_or(AuthError::MissingCode)?;
    let identity = state.identity.exchange_code(&code).await?;
    let user = register_via_sso(state.store.as_ref(), &identity).await?;
    Ok((identity, user))
}

pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    match login(&state, query).await {
        Ok((identity, user)) => {
            info!("User {} signed in", user.id);
            let cookies = AppendHeaders([
                (SET_COOKIE, identity_cookie("user_email", user.email)),
                (SET_COOKIE, identity_cookie("user_first_name", identity.given_name)),
                (SET_COOKIE, identity_cookie("user_last_name", identity.family_name)),
            ]);
            (cookies, Redirect::to(&state.redirects.success)).into_response()
        }
        Err(e) => {
            warn!("SSO login failed: {}", e);
            Redirect::to(&state.redirects.failure).into_response()
        }
    }
}
