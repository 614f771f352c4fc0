// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration assembled from the environment

use std::env;
use std::net::SocketAddr;

use crate::auth::OAuthConfig;
use crate::chat::ChatConfig;
use crate::content::ContentFetchConfig;

pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 8080;

/// Listen address for the HTTP API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_string()),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_API_PORT),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid listen address {}:{}: {}", self.host, self.port, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
        }
    }
}

/// Every sub-config the service needs
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub content: ContentFetchConfig,
    pub chat: ChatConfig,
    pub oauth: OAuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            content: ContentFetchConfig::from_env(),
            chat: ChatConfig::from_env(),
            oauth: OAuthConfig::from_env(),
        }
    }

    /// Validate every section, prefixing errors with the section name
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate().map_err(|e| format!("server: {}", e))?;
        self.content.validate().map_err(|e| format!("content: {}", e))?;
        self.chat.validate().map_err(|e| format!("chat: {}", e))?;
        self.oauth.validate().map_err(|e| format!("oauth: {}", e))?;
        Ok(())
    }
}
