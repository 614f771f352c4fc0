// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for link fetching
//!
//! Defines timeouts, concurrency and per-page limits.

use std::env;
use std::time::Duration;

/// Hard ceiling on parallel page fetches
pub const MAX_FETCH_CONCURRENCY: usize = 16;

/// Configuration for fetching and extracting linked pages
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_per_page_secs: u64,
    /// Pages fetched in parallel while building a context (default: 4)
    pub max_concurrent_fetches: usize,
    /// Maximum characters kept per page (default: 20000)
    pub max_chars_per_page: usize,
    /// Allow loopback/private hosts (default: false)
    pub allow_private_hosts: bool,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_per_page_secs: env::var("CONTENT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_per_page_secs),
            max_concurrent_fetches: env::var("CONTENT_FETCH_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_concurrent_fetches)
                .min(MAX_FETCH_CONCURRENCY),
            max_chars_per_page: env::var("CONTENT_FETCH_MAX_CHARS_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_chars_per_page),
            allow_private_hosts: env::var("CONTENT_FETCH_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_per_page_secs == 0 {
            return Err("timeout_per_page_secs must be at least 1".to_string());
        }
        if self.max_concurrent_fetches == 0 {
            return Err("max_concurrent_fetches must be at least 1".to_string());
        }
        if self.max_chars_per_page < 100 {
            return Err("max_chars_per_page must be at least 100".to_string());
        }
        Ok(())
    }

    pub fn timeout_per_page(&self) -> Duration {
        Duration::from_secs(self.timeout_per_page_secs)
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_per_page_secs: 10,
            max_concurrent_fetches: 4,
            max_chars_per_page: 20_000,
            allow_private_hosts: false,
        }
    }
}
