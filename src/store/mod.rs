// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Storage collaborator for users, links and contexts
//!
//! The service only needs simple key lookups, owner filters and
//! membership-in-list filters, so the backend sits behind the [`Store`]
//! trait. [`InMemoryStore`] is the bundled implementation.

pub mod memory;
pub mod types;

use async_trait::async_trait;

pub use memory::InMemoryStore;
pub use types::{
    normalize_email, validate_email, Context, ContextId, LinkId, NewContext, NewUser, NewUserLink,
    StoreError, User, UserId, UserLink,
};

/// CRUD operations over users, links and contexts
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Refresh the user's `last_login` timestamp
    async fn touch_login(&self, id: UserId) -> Result<(), StoreError>;

    /// Delete a user and everything they own. Returns false if absent.
    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError>;

    async fn create_link(&self, new_link: NewUserLink) -> Result<UserLink, StoreError>;

    /// All links owned by `user_id`, ordered by id
    async fn links_for_user(&self, user_id: UserId) -> Result<Vec<UserLink>, StoreError>;

    /// Links whose id is in `ids` AND whose owner is `user_id`, ordered by id
    ///
    /// Unknown ids and ids owned by someone else are silently left out.
    async fn find_user_links(
        &self,
        user_id: UserId,
        ids: &[LinkId],
    ) -> Result<Vec<UserLink>, StoreError>;

    /// Delete every link in `ids`, returning how many existed
    async fn delete_links(&self, ids: &[LinkId]) -> Result<usize, StoreError>;

    /// Persist a context; every link must belong to the context's user
    async fn create_context(&self, new_context: NewContext) -> Result<Context, StoreError>;

    async fn get_context(&self, id: ContextId) -> Result<Option<Context>, StoreError>;
}
