//! Core business logic - framework-agnostic CRUD over the congregational entities.
//!
//! Every function takes a database connection explicitly and returns a [`Result`],
//! so the same operations back the CLI, the report layer and the tests.

use crate::errors::{Error, Result};

pub mod attendance;
pub mod categories;
pub mod donation;
pub mod event;
pub mod finance;
pub mod member;
pub mod prayer;
pub mod receipt;
pub mod sermon;
pub mod small_group;

/// Trims a required text field, rejecting blank input.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trims optional text, mapping blank input to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Monetary amounts must be finite and strictly positive.
pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert!(matches!(require_text("title", "  Sunday  "), Ok(ref s) if s == "Sunday"));
        assert!(matches!(
            require_text("title", "   "),
            Err(Error::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" hall ".to_string())), Some("hall".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(10.0).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
