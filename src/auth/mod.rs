// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single sign-on
//!
//! ```text
//! /users/google_sso → consent page → /auth/callback?code=…
//!     → IdentityProvider::exchange_code → register_via_sso → cookies + redirect
//! ```

pub mod config;
pub mod identity;
pub mod sso;

pub use config::OAuthConfig;
pub use identity::{AuthError, GoogleIdentityProvider, Identity, IdentityProvider};
pub use sso::register_via_sso;
