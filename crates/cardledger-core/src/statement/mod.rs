//! Statement extraction: line classification, bank detection, per-bank
//! grammars, record validation and categorization.

pub mod builder;
pub mod categorizer;
pub mod classifier;
pub mod detector;
pub mod grammar;
mod pipeline;
pub mod rules;

pub use builder::RecordBuilder;
pub use categorizer::{Categorizer, CategoryRule};
pub use classifier::LineClassifier;
pub use detector::{BankDetector, Detection};
pub use grammar::{GrammarOutput, Phase, StatementGrammar};
pub use pipeline::{split_pages, StatementPipeline, PAGE_BREAK};

use crate::models::statement::ParseResult;

/// Turns recovered statement text into a parse result.
pub trait StatementExtractor {
    /// Extract from pages of lines.
    fn extract(&self, pages: &[Vec<String>]) -> ParseResult;

    /// Extract from a form-feed separated text dump.
    fn extract_from_text(&self, text: &str) -> ParseResult;
}
