// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Saved-link endpoints

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    delete_link_handler, delete_links_handler, save_user_link_handler, user_links_handler,
};
pub use request::{DeleteLinksRequest, SaveUserLinkRequest, UserLinksQuery};
pub use response::{DeleteLinksResponse, LinkSummary, SaveUserLinkResponse};
