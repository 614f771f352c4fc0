// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context building
//!
//! Resolves a user's link ids, fetches every page with bounded parallelism,
//! and persists the concatenated text as a new context.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::fragment::{concatenate, Fragment};
use crate::content::{ContentFetchConfig, LinkFetcher};
use crate::store::{
    normalize_email, validate_email, Context, LinkId, NewContext, Store, StoreError, UserId,
};

/// Errors that abort a context build
///
/// Per-link fetch failures are not errors; they become failure fragments.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Builds and persists contexts from saved links
pub struct ContextBuilder {
    store: Arc<dyn Store>,
    fetcher: Arc<dyn LinkFetcher>,
    max_concurrent_fetches: usize,
    fetch_timeout: Duration,
}

impl ContextBuilder {
    pub fn new(
        store: Arc<dyn Store>,
        fetcher: Arc<dyn LinkFetcher>,
        config: &ContentFetchConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            max_concurrent_fetches: config.max_concurrent_fetches.max(1),
            fetch_timeout: config.timeout_per_page(),
        }
    }

    /// Build a context for the user identified by `email`
    pub async fn build_context_for_email(
        &self,
        email: &str,
        link_ids: &[LinkId],
    ) -> Result<Context, ContextError> {
        let email = normalize_email(email);
        validate_email(&email).map_err(|message| ContextError::Validation {
            field: "email".to_string(),
            message,
        })?;

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(ContextError::UserNotFound(email))?;

        self.build_context(user.id, link_ids).await
    }

    /// Build and persist a context from `link_ids` owned by `user_id`
    ///
    /// Ids that are unknown or owned by another user are dropped. One
    /// fragment is produced per resolved link, in the order the store
    /// returned them; a failed fetch yields a failure fragment and never
    /// aborts the build.
    pub async fn build_context(
        &self,
        user_id: UserId,
        link_ids: &[LinkId],
    ) -> Result<Context, ContextError> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(ContextError::UserNotFound(user_id.to_string()));
        }

        let links = self.store.find_user_links(user_id, link_ids).await?;
        if links.len() < link_ids.len() {
            debug!(
                "Dropped {} of {} requested link ids for user {}",
                link_ids.len() - links.len(),
                link_ids.len(),
                user_id
            );
        }

        let resolved_ids: Vec<LinkId> = links.iter().map(|l| l.id).collect();
        let urls: Vec<String> = links.into_iter().map(|l| l.link).collect();
        let fragments = self.fetch_fragments(&urls).await;

        let parsed = fragments.iter().filter(|f| f.is_parsed()).count();
        let context = self
            .store
            .create_context(NewContext {
                user_id,
                link_ids: resolved_ids,
                context: concatenate(&fragments),
            })
            .await?;

        info!(
            "Created context {} for user {} ({}/{} links parsed)",
            context.id,
            user_id,
            parsed,
            fragments.len()
        );
        Ok(context)
    }

    /// Fetch every URL, at most `max_concurrent_fetches` at a time
    ///
    /// Output order follows input order regardless of completion order.
    pub async fn fetch_fragments(&self, urls: &[String]) -> Vec<Fragment> {
        stream::iter(urls.iter().cloned())
            .map(|url| self.fetch_fragment(url))
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await
    }

    /// Fetch one URL and turn the outcome into a fragment
    pub async fn fetch_fragment(&self, url: String) -> Fragment {
        match timeout(self.fetch_timeout, self.fetcher.fetch_and_extract(&url)).await {
            Ok(Ok(page)) => Fragment::parsed(url, page.text),
            Ok(Err(e)) => {
                info!("Failed to process link {}: {}", url, e);
                Fragment::failed(url)
            }
            Err(_) => {
                warn!("Fetch timeout exceeded for link {}", url);
                Fragment::failed(url)
            }
        }
    }
}
