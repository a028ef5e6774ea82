//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Callers that need to
//! react differently to "not found", "network down" or "bad input" use
//! [`Error::kind`], which tags the error without discarding the original cause.

use serde::Serialize;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problems
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A required input was missing or malformed
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Description of the validation failure
        message: String,
    },

    /// A monetary amount was zero, negative, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A row referenced by id does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. `"member"`
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// The backend refused the operation
    #[error("Not authorized: {message}")]
    Unauthorized {
        /// Message returned by the backend
        message: String,
    },

    /// Errors surfaced by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Integer conversion failures (limits, offsets)
    #[error("Conversion error: {0}")]
    Conversion(#[from] std::num::TryFromIntError),

    /// Report serialization failures
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`], used by report consumers to render
/// differentiated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested row or table does not exist
    NotFound,
    /// The backend rejected the credentials or policy check
    Unauthorized,
    /// The backend could not be reached
    Network,
    /// The caller supplied invalid input
    Validation,
    /// Anything else
    Unknown,
}

impl Error {
    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::InvalidAmount { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Database(db_err) => classify_db_error(db_err),
            Self::Config { .. }
            | Self::Io(_)
            | Self::Conversion(_)
            | Self::Serialization(_) => ErrorKind::Unknown,
        }
    }

    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for building a [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

fn classify_db_error(err: &sea_orm::DbErr) -> ErrorKind {
    use sea_orm::DbErr;

    match err {
        DbErr::RecordNotFound(_) => ErrorKind::NotFound,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => ErrorKind::Network,
        other => {
            // SQLite reports missing tables and permission problems as plain query errors
            let text = other.to_string().to_lowercase();
            if text.contains("no such table") {
                ErrorKind::NotFound
            } else if text.contains("permission denied") || text.contains("not authorized") {
                ErrorKind::Unauthorized
            } else {
                ErrorKind::Unknown
            }
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_validation_errors_are_tagged_validation() {
        assert_eq!(
            Error::validation("title", "cannot be empty").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::InvalidAmount { amount: -1.0 }.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_not_found_is_tagged() {
        let err = Error::not_found("event", 42);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "event not found: 42");
    }

    #[test]
    fn test_db_record_not_found_maps_to_not_found() {
        let err = Error::from(DbErr::RecordNotFound("members".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_db_missing_table_maps_to_not_found() {
        let err = Error::from(DbErr::Custom("no such table: donations".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_db_permission_maps_to_unauthorized() {
        let err = Error::from(DbErr::Custom(
            "permission denied for table donations".to_string(),
        ));
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let err = Error::Config {
            message: "bad".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(
            Error::from(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Unknown
        );
    }
}
