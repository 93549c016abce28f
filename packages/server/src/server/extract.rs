//! Request body extraction.
//!
//! `ApiJson<T>` is `axum::Json<T>` with its rejection routed through
//! [`ApiError`], so malformed or incomplete bodies answer 400 with the usual
//! `{ "message": ... }` body instead of axum's plain-text 422.

use axum::extract::FromRequest;

use crate::server::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
