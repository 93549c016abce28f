use thiserror::Error;

use crate::common::SiteId;

/// Failures surfaced by the verification cascade.
///
/// Only `NotFound` is an expected outcome; the other variants mean the
/// transaction was rolled back and the caller sees a server fault.
#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Site {0} not found")]
    NotFound(SiteId),

    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Moderation store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
}

impl ModerationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModerationError::NotFound(_))
    }
}

impl From<sqlx::Error> for ModerationError {
    fn from(err: sqlx::Error) -> Self {
        // SQLSTATE class 23 is integrity constraint violation
        if let sqlx::Error::Database(db) = &err {
            if db.code().is_some_and(|code| code.starts_with("23")) {
                return ModerationError::ConstraintViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                    message: db.message().to_string(),
                };
            }
        }
        ModerationError::StoreUnavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_store_unavailable() {
        let err = ModerationError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ModerationError::StoreUnavailable(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_message_names_site() {
        let err = ModerationError::NotFound(SiteId::from_i32(404));
        assert_eq!(err.to_string(), "Site 404 not found");
        assert!(err.is_not_found());
    }
}
