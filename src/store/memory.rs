// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-process store backed by ordered maps

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::{
    Context, ContextId, LinkId, NewContext, NewUser, NewUserLink, StoreError, User, UserId,
    UserLink,
};
use super::Store;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    links: BTreeMap<LinkId, UserLink>,
    contexts: BTreeMap<ContextId, Context>,
    next_user_id: UserId,
    next_link_id: LinkId,
    next_context_id: ContextId,
}

impl Tables {
    fn allocate(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

/// Store that keeps every table in memory
///
/// Ids start at 1 and increase monotonically per table; iteration order is
/// ascending id, which is the order lookups return rows in.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail {
                email: new_user.email,
            });
        }

        let now = Utc::now();
        let user = User {
            id: Tables::allocate(&mut tables.next_user_id),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            date_joined: now,
            last_login: now,
            is_active: true,
            is_admin: false,
        };
        tables.users.insert(user.id, user.clone());
        debug!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn touch_login(&self, id: UserId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        user.last_login = Utc::now();
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.links.retain(|_, link| link.user_id != id);
        tables.contexts.retain(|_, ctx| ctx.user_id != id);
        debug!("Deleted user {} with owned links and contexts", id);
        Ok(true)
    }

    async fn create_link(&self, new_link: NewUserLink) -> Result<UserLink, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new_link.user_id) {
            return Err(StoreError::UserNotFound(new_link.user_id));
        }

        let link = UserLink {
            id: Tables::allocate(&mut tables.next_link_id),
            name: new_link.name,
            user_id: new_link.user_id,
            link: new_link.link,
            created_on: Utc::now().date_naive(),
        };
        tables.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn links_for_user(&self, user_id: UserId) -> Result<Vec<UserLink>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_user_links(
        &self,
        user_id: UserId,
        ids: &[LinkId],
    ) -> Result<Vec<UserLink>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .values()
            .filter(|l| l.user_id == user_id && ids.contains(&l.id))
            .cloned()
            .collect())
    }

    async fn delete_links(&self, ids: &[LinkId]) -> Result<usize, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.links.len();
        tables.links.retain(|id, _| !ids.contains(id));
        let deleted = before - tables.links.len();

        // Contexts keep their text but drop references to deleted links
        for ctx in tables.contexts.values_mut() {
            ctx.link_ids.retain(|id| !ids.contains(id));
        }
        Ok(deleted)
    }

    async fn create_context(&self, new_context: NewContext) -> Result<Context, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new_context.user_id) {
            return Err(StoreError::UserNotFound(new_context.user_id));
        }
        for link_id in &new_context.link_ids {
            match tables.links.get(link_id) {
                Some(link) if link.user_id == new_context.user_id => {}
                _ => {
                    return Err(StoreError::ForeignLink {
                        link_id: *link_id,
                        user_id: new_context.user_id,
                    })
                }
            }
        }

        let context = Context {
            id: Tables::allocate(&mut tables.next_context_id),
            created_on: Utc::now().date_naive(),
            user_id: new_context.user_id,
            link_ids: new_context.link_ids,
            context: new_context.context,
        };
        tables.contexts.insert(context.id, context.clone());
        Ok(context)
    }

    async fn get_context(&self, id: ContextId) -> Result<Option<Context>, StoreError> {
        Ok(self.tables.read().await.contexts.get(&id).cloned())
    }
}
