// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Link fetching and text extraction
//!
//! Fetches the page behind a saved link and reduces it to plain text for
//! context building.
//!
//! ## Architecture
//!
//! ```text
//! UserLink (URL) → HttpLinkFetcher → HTML → extract_visible_text → Clean Text
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = ContentFetchConfig::from_env();
//! let fetcher = HttpLinkFetcher::new(config)?;
//! let page = fetcher.fetch_and_extract("https://example.com").await?;
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::ContentFetchConfig;
pub use extractor::{extract_visible_text, truncate_content};
pub use fetcher::{FetchError, HttpLinkFetcher, LinkFetcher, PageText};
