// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rate-limit detection for chat-completion failures
//!
//! The upstream reports token throttling only as free text, e.g.
//! `Rate limit reached for model ... on tokens per minute (TPM): ...
//! Please try again in 2m30.5s.` The matching lives behind
//! [`RateLimitClassifier`] so a client with structured error codes can
//! replace it.

use regex::Regex;
use std::sync::OnceLock;

/// Cooldown used when the error text carries no parseable duration
pub const DEFAULT_COOLDOWN_SECS: u64 = 600;

/// Human-readable cooldown shown to clients
pub const COOLDOWN_DISPLAY: &str = "10 minutes";

const RATE_LIMIT_MARKER: &str = "Rate limit reached";
const TPM_MARKER: &str = "tokens per minute (TPM)";

/// Outcome of inspecting an upstream error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitClassification {
    pub is_rate_limit: bool,
    /// Seconds to wait before retrying; 0 when not rate limited
    pub retry_after_seconds: u64,
}

impl RateLimitClassification {
    pub fn not_limited() -> Self {
        Self {
            is_rate_limit: false,
            retry_after_seconds: 0,
        }
    }

    pub fn limited(retry_after_seconds: u64) -> Self {
        Self {
            is_rate_limit: true,
            retry_after_seconds,
        }
    }
}

/// Strategy for deciding whether an upstream error is throttling
pub trait RateLimitClassifier: Send + Sync {
    fn classify(&self, error_text: &str) -> RateLimitClassification;
}

/// Matches the token-per-minute wording of OpenAI-compatible vendors
#[derive(Debug, Default, Clone, Copy)]
pub struct TpmMessageClassifier;

impl RateLimitClassifier for TpmMessageClassifier {
    fn classify(&self, error_text: &str) -> RateLimitClassification {
        classify(error_text)
    }
}

fn cooldown_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)try again in (\d+)m(\d+(?:\.\d+)?)s").expect("valid cooldown regex")
    })
}

/// Classify an upstream error message
///
/// Both markers must be present for a rate limit. The cooldown comes from a
/// `<minutes>m<seconds>s` duration, truncated to whole seconds, or
/// [`DEFAULT_COOLDOWN_SECS`] when absent.
pub fn classify(error_text: &str) -> RateLimitClassification {
    if !(error_text.contains(RATE_LIMIT_MARKER) && error_text.contains(TPM_MARKER)) {
        return RateLimitClassification::not_limited();
    }

    let retry_after = parse_cooldown(error_text).unwrap_or(DEFAULT_COOLDOWN_SECS);
    RateLimitClassification::limited(retry_after)
}

fn parse_cooldown(error_text: &str) -> Option<u64> {
    let captures = cooldown_pattern().captures(error_text)?;
    let minutes: u64 = captures.get(1)?.as_str().parse().ok()?;
    let seconds: f64 = captures.get(2)?.as_str().parse().ok()?;
    Some(minutes * 60 + seconds.trunc() as u64)
}
