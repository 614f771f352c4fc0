// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context building from saved links

pub mod builder;
pub mod fragment;

pub use builder::{ContextBuilder, ContextError};
pub use fragment::{concatenate, Fragment};
