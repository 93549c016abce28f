use thiserror::Error;

/// Authentication and authorization failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}
