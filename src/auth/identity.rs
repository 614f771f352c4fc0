// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Identity provider: authorization-code exchange and token verification

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::config::OAuthConfig;
use crate::store::StoreError;

/// Timeout for each call to the identity provider
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// The verified identity of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

/// Authentication failures; every variant ends the login attempt
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization code missing from callback")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Identity token rejected: {0}")]
    InvalidToken(String),

    #[error("Invalid provider configuration: {0}")]
    Configuration(String),

    #[error("User registration failed: {0}")]
    Registration(#[from] StoreError),
}

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Consent page the browser is sent to
    fn authorization_url(&self) -> Result<String, AuthError>;

    /// Exchange an authorization code for a verified identity
    async fn exchange_code(&self, code: &str) -> Result<Identity, AuthError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

#[derive(Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

/// Google OAuth 2.0 / OpenID Connect provider
pub struct GoogleIdentityProvider {
    client: Client,
    config: OAuthConfig,
}

impl GoogleIdentityProvider {
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn fetch_id_token(&self, code: &str) -> Result<String, AuthError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::TokenExchange(format!("HTTP {}", status.as_u16())));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        token
            .id_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("no id_token in response".to_string()))
    }

    async fn verify_id_token(&self, id_token: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidToken(format!(
                "verification returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if info.aud != self.config.client_id {
            warn!("Identity token issued for a different audience");
            return Err(AuthError::InvalidToken("audience mismatch".to_string()));
        }
        let email = info
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("token carries no email".to_string()))?;

        Ok(Identity {
            email,
            given_name: info.given_name.unwrap_or_default(),
            family_name: info.family_name.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self) -> Result<String, AuthError> {
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", "openid email profile"),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<Identity, AuthError> {
        if code.trim().is_empty() {
            return Err(AuthError::MissingCode);
        }
        debug!("Exchanging authorization code");
        let id_token = self.fetch_id_token(code).await?;
        let identity = self.verify_id_token(&id_token).await?;
        info!("Verified identity for {}", identity.email);
        Ok(identity)
    }
}
