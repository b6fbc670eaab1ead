//! Request extractors that report failures as [`LedgerError`].

use axum::extract::FromRequest;

use crate::error::LedgerError;

/// JSON body extractor whose rejections render as the usual error body
/// (`{"error":{"code":1001,...}}`) instead of axum's plain-text reply.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(LedgerError))]
pub struct ApiJson<T>(pub T);
