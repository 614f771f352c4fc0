// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! User endpoints
//!
//! Registration, lookup, account deletion and the SSO entry point.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    create_user_handler, delete_account_handler, get_user_handler, google_sso_handler,
    list_users_handler,
};
pub use request::{DeleteAccountRequest, RegisterUserRequest};
pub use response::{DeleteAccountResponse, UserResponse};
