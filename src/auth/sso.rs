// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Registration of users arriving through single sign-on

use tracing::info;

use super::identity::{AuthError, Identity};
use crate::store::{normalize_email, NewUser, Store, User};

/// Create the user on first login, refresh `last_login` afterwards
///
/// Invalid identities (bad email, oversized names) fail without creating a
/// user.
pub async fn register_via_sso(store: &dyn Store, identity: &Identity) -> Result<User, AuthError> {
    let email = normalize_email(&identity.email);

    if let Some(user) = store.find_user_by_email(&email).await? {
        info!("User {} already exists, refreshing last login", user.id);
        store.touch_login(user.id).await?;
        return Ok(store.get_user(user.id).await?.unwrap_or(user));
    }

    let new_user = NewUser {
        email,
        first_name: identity.given_name.trim().to_string(),
        last_name: identity.family_name.trim().to_string(),
    };
    new_user.validate()?;

    let user = store.create_user(new_user).await?;
    info!("Registered user {} via SSO", user.id);
    Ok(user)
}
