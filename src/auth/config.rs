// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for Google single sign-on

use std::env;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
pub const DEFAULT_LOGIN_REDIRECT_PATH: &str = "/api/index/";
pub const DEFAULT_LOGIN_ERROR_REDIRECT_PATH: &str = "/api/loginError.html/";

/// OAuth client settings and post-login redirect targets
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback registered with the provider (our `/auth/callback`)
    pub redirect_uri: String,
    /// Consent page
    pub auth_url: String,
    /// Authorization-code exchange endpoint
    pub token_url: String,
    /// Identity-token verification endpoint
    pub tokeninfo_url: String,
    /// Where a successful login lands
    pub login_redirect_path: String,
    /// Where a failed login lands
    pub login_error_redirect_path: String,
}

impl OAuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            client_id: env::var("GOOGLE_OAUTH_CLIENT_ID").unwrap_or(defaults.client_id),
            client_secret: env::var("GOOGLE_OAUTH_CLIENT_SECRET")
                .unwrap_or(defaults.client_secret),
            redirect_uri: env::var("GOOGLE_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            auth_url: env::var("GOOGLE_AUTH_URL").unwrap_or(defaults.auth_url),
            token_url: env::var("GOOGLE_TOKEN_URL").unwrap_or(defaults.token_url),
            tokeninfo_url: env::var("GOOGLE_TOKENINFO_URL").unwrap_or(defaults.tokeninfo_url),
            login_redirect_path: env::var("LOGIN_REDIRECT_PATH")
                .unwrap_or(defaults.login_redirect_path),
            login_error_redirect_path: env::var("LOGIN_ERROR_REDIRECT_PATH")
                .unwrap_or(defaults.login_error_redirect_path),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.client_id.trim().is_empty() {
            return Err("GOOGLE_OAUTH_CLIENT_ID must be set".to_string());
        }
        if self.client_secret.trim().is_empty() {
            return Err("GOOGLE_OAUTH_CLIENT_SECRET must be set".to_string());
        }
        if self.redirect_uri.trim().is_empty() {
            return Err("GOOGLE_REDIRECT_URI must be set".to_string());
        }
        for (name, value) in [
            ("auth_url", &self.auth_url),
            ("token_url", &self.token_url),
            ("tokeninfo_url", &self.tokeninfo_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(format!("{} is not a valid URL: {}", name, value));
            }
        }
        if !self.login_redirect_path.starts_with('/')
            || !self.login_error_redirect_path.starts_with('/')
        {
            return Err("login redirect paths must start with '/'".to_string());
        }
        Ok(())
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            tokeninfo_url: DEFAULT_TOKENINFO_URL.to_string(),
            login_redirect_path: DEFAULT_LOGIN_REDIRECT_PATH.to_string(),
            login_error_redirect_path: DEFAULT_LOGIN_ERROR_REDIRECT_PATH.to_string(),
        }
    }
}
