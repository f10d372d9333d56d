//! Error types for catalog loading and quote computation.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for quote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Catalog file not found (-1)
    FileNotFound = -1,
    /// Empty catalog file (-2)
    EmptyCatalog = -2,
    /// Malformed catalog (-3)
    ParseError = -3,
    /// Pricing config out of range (-4)
    InvalidConfig = -4,
    /// Rejected user input (E100)
    InvalidInput = 100,
    /// Area below the variant minimum (E101)
    BelowMinimum = 101,
    /// Saved quote storage failure (E200)
    StoreFailed = 200,
}

/// Reasons a quote request is rejected before any breakdown is built.
///
/// The `Display` text is meant to be shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select a service option before calculating")]
    NoVariantSelected,

    #[error("Please enter a valid area in square feet (got '{input}')")]
    InvalidArea { input: String },

    #[error("The maximum size that can be quoted is {maximum} ft² (got {area} ft²)")]
    AreaTooLarge { area: f64, maximum: f64 },

    #[error("The minimum size for this service is {minimum} ft² (got {area} ft²)")]
    BelowMinimumArea { area: f64, minimum: f64 },

    #[error("Discount must be between 0 and 100 percent (got {percent})")]
    InvalidDiscount { percent: f64 },

    #[error("Installation cost must be a non-negative amount (got {amount})")]
    InvalidInstallationCost { amount: f64 },
}

/// Main error type for the quotation core.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Catalog not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty catalog: {path}")]
    EmptyCatalog { path: PathBuf },

    #[error("Malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pricing config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Saved quotes are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::FileNotFound { .. } => ErrorCode::FileNotFound,
            QuoteError::EmptyCatalog { .. } => ErrorCode::EmptyCatalog,
            QuoteError::Csv(_) => ErrorCode::ParseError,
            QuoteError::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            QuoteError::Validation(ValidationError::BelowMinimumArea { .. }) => {
                ErrorCode::BelowMinimum
            }
            QuoteError::Validation(_) => ErrorCode::InvalidInput,
            QuoteError::Json(_) => ErrorCode::StoreFailed,
            QuoteError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// The validation failure behind this error, if that is what it is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            QuoteError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for quotation operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_codes() {
        let err = QuoteError::from(ValidationError::BelowMinimumArea {
            area: 1.0,
            minimum: 2.0,
        });
        assert_eq!(err.code(), ErrorCode::BelowMinimum);
        assert_eq!(err.code_value(), 101);

        let err = QuoteError::from(ValidationError::NoVariantSelected);
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.as_validation(), Some(&ValidationError::NoVariantSelected));
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let err = QuoteError::from(ValidationError::BelowMinimumArea {
            area: 1.5,
            minimum: 3.0,
        });
        assert_eq!(
            err.to_string(),
            "The minimum size for this service is 3 ft² (got 1.5 ft²)"
        );
    }

    #[test]
    fn test_catalog_codes() {
        let err = QuoteError::EmptyCatalog {
            path: PathBuf::from("catalog.csv"),
        };
        assert_eq!(err.code_value(), -2);
        assert!(err.as_validation().is_none());
    }

    #[test]
    fn test_config_code() {
        let err = QuoteError::InvalidConfig {
            reason: "transformer_coverage must be greater than 0 (got 0)".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert_eq!(err.code_value(), -4);
    }
}
