// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with bounded timeouts
//!
//! Fetches a saved link and turns the body into plain text. Every failure is
//! returned as a [`FetchError`]; nothing here panics or aborts the caller.

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::{Host, Url};

use super::config::ContentFetchConfig;
use super::extractor::{extract_visible_text, truncate_content};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; ContextLinksBot/1.0)";
const MAX_REDIRECTS: usize = 5;

/// Text extracted from a fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub url: String,
    pub text: String,
}

/// Content fetch error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// Connection or protocol error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),
    /// URL is malformed, not http(s), or points at a private host
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
}

/// Retrieves a URL and extracts its visible text
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    async fn fetch_and_extract(&self, url: &str) -> Result<PageText, FetchError>;
}

/// [`LinkFetcher`] backed by reqwest and the HTML extractor
pub struct HttpLinkFetcher {
    client: Client,
    config: ContentFetchConfig,
}

impl HttpLinkFetcher {
    /// Create a new fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout_per_page())
            .user_agent(USER_AGENT)
            .redirect(redirect_policy(config.allow_private_hosts))
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Check if URL is safe to fetch (not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        Url::parse(url).map(|u| is_safe_target(&u)).unwrap_or(false)
    }
}

fn is_safe_target(url: &Url) -> bool {
    if !["http", "https"].contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_public_ipv6(ip),
        None => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let octets = ip.octets();
    // 0.0.0.0/8 and 100.64.0.0/10 (shared address space)
    let reserved = octets[0] == 0 || (octets[0] == 100 && (octets[1] & 0xc0) == 64);

    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || reserved)
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_public_ipv4(v4);
    }

    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00; // fc00::/7
    let link_local = (first & 0xffc0) == 0xfe80; // fe80::/10

    !(ip.is_loopback() || ip.is_unspecified() || unique_local || link_local)
}

/// Decide whether the client may follow a redirect to `target`
///
/// `requested` counts the URLs already requested in this chain.
fn check_redirect(target: &Url, requested: usize, allow_private_hosts: bool) -> Result<(), String> {
    if requested > MAX_REDIRECTS {
        return Err(format!("too many redirects ({})", requested));
    }
    if !allow_private_hosts && !is_safe_target(target) {
        return Err(format!("redirect to unsafe URL blocked: {}", target));
    }
    Ok(())
}

fn redirect_policy(allow_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        let decision = check_redirect(attempt.url(), attempt.previous().len(), allow_private_hosts);
        match decision {
            Ok(()) => attempt.follow(),
            Err(reason) => {
                warn!("Not following redirect: {}", reason);
                attempt.error(reason)
            }
        }
    })
}

#[async_trait]
impl LinkFetcher for HttpLinkFetcher {
    async fn fetch_and_extract(&self, url: &str) -> Result<PageText, FetchError> {
        if !self.config.allow_private_hosts && !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        if Url::parse(url).is_err() {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let text = truncate_content(
            &extract_visible_text(&html),
            self.config.max_chars_per_page,
        );

        info!("Fetched {} chars from: {}", text.len(), url);

        Ok(PageText {
            url: url.to_string(),
            text,
        })
    }
}
