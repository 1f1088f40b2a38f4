//! Core library for credit-card statement extraction.
//!
//! This crate provides:
//! - Line classification of recovered statement text
//! - Bank detection and per-bank transaction grammars (HDFC, ICICI, Axis,
//!   IDFC First, Indian Bank, generic fallback)
//! - Typed, validated transactions and account summaries
//! - Rule-based spend categorization

pub mod error;
pub mod models;
pub mod statement;

pub use error::{Result, StatementError, ValidationError};
pub use models::config::EngineConfig;
pub use models::profile::{BankId, BankProfile, DateFormat, SignConvention};
pub use models::statement::{
    AccountSummary, Confidence, Diagnostic, DiagnosticKind, Direction, LineRef, LineRole,
    ParseResult, RawLine, Severity, StatementPeriod, TextSource, Transaction,
};
pub use statement::{Categorizer, StatementExtractor, StatementPipeline};
