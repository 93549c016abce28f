//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the body is always
//! `{ "message": ... }`. Server faults are logged here and never leak
//! internals to the caller.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::{AuthError, IdError};
use crate::domains::moderation::ModerationError;

pub const FOREIGN_KEY_VIOLATION: &str = "23503";
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a store error, turning foreign-key and unique violations into 409.
    pub fn from_store(err: anyhow::Error, conflict_message: &str) -> Self {
        match sqlstate(&err).as_deref() {
            Some(FOREIGN_KEY_VIOLATION) | Some(UNIQUE_VIOLATION) => {
                ApiError::Conflict(conflict_message.to_string())
            }
            _ => err.into(),
        }
    }
}

/// SQLSTATE of the database error wrapped in `err`, if any
pub fn sqlstate(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code().map(|c| c.into_owned()))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!(error = ?err, "Request failed");
        ApiError::Internal
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => ApiError::Unauthorized,
            AuthError::PermissionDenied(reason) => ApiError::Forbidden(reason),
        }
    }
}

impl From<ModerationError> for ApiError {
    fn from(err: ModerationError) -> Self {
        match err {
            ModerationError::NotFound(site_id) => {
                ApiError::NotFound(format!("Site {} not found", site_id))
            }
            ModerationError::ConstraintViolation { .. } => {
                error!(error = %err, "Moderation cascade hit a constraint violation");
                ApiError::Internal
            }
            ModerationError::StoreUnavailable(_) => {
                error!(error = ?err, "Moderation store unavailable");
                ApiError::Internal
            }
        }
    }
}
