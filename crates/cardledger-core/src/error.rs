//! Error types for the cardledger-core library.
//!
//! Document processing itself never fails: malformed input degrades into
//! diagnostics on the [`ParseResult`](crate::models::statement::ParseResult).
//! These errors cover configuration and record validation.

use thiserror::Error;

/// Main error type for the cardledger library.
#[derive(Error, Debug)]
pub enum StatementError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A category or signature pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a raw field tuple cannot become a transaction at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No supported date format matches the date text.
    #[error("unparseable date: {value:?}")]
    UnparseableDate { value: String },

    /// The amount text is not a decimal number.
    #[error("unparseable amount: {value:?}")]
    UnparseableAmount { value: String },

    /// Zero amounts carry no direction and are not ledger entries.
    #[error("amount must be greater than zero: {value:?}")]
    NonPositiveAmount { value: String },
}

/// Result type for the cardledger library.
pub type Result<T> = std::result::Result<T, StatementError>;
