// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OAuth callback endpoint

pub mod handler;

pub use handler::{callback_handler, CallbackQuery};
