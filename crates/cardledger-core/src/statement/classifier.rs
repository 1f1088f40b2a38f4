//! Line classification.
//!
//! Assigns each recovered line a structural role from cheap lexical signals.
//! The result is a first guess: grammars reclassify lines they understand
//! better, and the pipeline records the final roles.

use tracing::trace;

use super::rules::find_labels;
use super::rules::patterns::{
    COLUMN_HEADER, HEADER_KEYWORDS, LEADING_DATE, PAGE_MARKER, SECTION_END,
};
use super::rules::ValueKind;
use crate::models::statement::{LineRole, RawLine};

/// Heuristic line classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Role of a single line of text.
    pub fn classify_line(&self, text: &str) -> LineRole {
        let trimmed = text.trim();

        if trimmed.is_empty() || PAGE_MARKER.is_match(trimmed) {
            return LineRole::Noise;
        }

        if LEADING_DATE.is_match(trimmed) {
            return LineRole::Transaction;
        }

        if COLUMN_HEADER.is_match(trimmed) {
            return LineRole::Header;
        }

        let labels = find_labels(trimmed);
        if labels.iter().any(|l| l.field.kind() == ValueKind::Money) {
            return LineRole::Summary;
        }

        if SECTION_END.is_match(trimmed) {
            return LineRole::Summary;
        }

        if !labels.is_empty() || HEADER_KEYWORDS.is_match(trimmed) {
            return LineRole::Header;
        }

        LineRole::Continuation
    }

    /// Classify every line of every page, in document order.
    pub fn classify<P, S>(&self, pages: &[P]) -> Vec<RawLine>
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut lines = Vec::new();

        for (page_index, page) in pages.iter().enumerate() {
            for (line_index, text) in page.as_ref().iter().enumerate() {
                let text = text.as_ref();
                let role = self.classify_line(text);
                trace!(page_index, line_index, ?role, "classified line");
                lines.push(RawLine {
                    page_index,
                    line_index,
                    text: text.to_string(),
                    role,
                });
            }
        }

        lines
    }
}
