// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request extractors whose rejections render as [`ApiError`]

use axum::extract::FromRequest;

use super::errors::ApiError;

/// JSON body extractor
///
/// Same as `axum::Json`, but malformed bodies, wrong field types and a
/// missing `content-type` come back as a 400 `ErrorResponse`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
