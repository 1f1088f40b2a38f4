//! Pipeline orchestration: classify, detect, parse, build, categorize.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, info};

use super::builder::RecordBuilder;
use super::categorizer::Categorizer;
use super::classifier::LineClassifier;
use super::detector::BankDetector;
use super::grammar::StatementGrammar;
use super::rules::patterns::AMOUNT_SHAPED;
use super::StatementExtractor;
use crate::error::Result;
use crate::models::config::EngineConfig;
use crate::models::profile::{profile, BankId};
use crate::models::statement::{
    AccountSummary, Confidence, Diagnostic, DiagnosticKind, LineRef, LineRole, ParseResult,
    RawLine, TextSource,
};

/// Page separator in plain-text statement dumps.
pub const PAGE_BREAK: char = '\x0c';

/// Statement extraction pipeline.
///
/// Holds only read-only configuration, so one instance can serve any number
/// of documents, including concurrently from several threads.
#[derive(Debug, Clone)]
pub struct StatementPipeline {
    config: EngineConfig,
    classifier: LineClassifier,
    detector: BankDetector,
    categorizer: Categorizer,
    source: TextSource,
}

impl StatementPipeline {
    /// Pipeline with default configuration and the built-in category rules.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            detector: BankDetector::new(config.detection.window_lines),
            config,
            classifier: LineClassifier::new(),
            categorizer: Categorizer::builtin(),
            source: TextSource::Digital,
        }
    }

    /// Pipeline from a configuration. Fails on invalid values or category patterns.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.check()?;
        let categorizer = Categorizer::from_config(&config.categories)?;

        Ok(Self {
            detector: BankDetector::new(config.detection.window_lines),
            config,
            classifier: LineClassifier::new(),
            categorizer,
            source: TextSource::Digital,
        })
    }

    /// Declare how the page text was recovered.
    pub fn with_source(mut self, source: TextSource) -> Self {
        self.source = source;
        self
    }

    /// Replace the category rules.
    pub fn with_categorizer(mut self, categorizer: Categorizer) -> Self {
        self.categorizer = categorizer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Process one document given as pages of lines.
    ///
    /// Never fails: problems are reported in [`ParseResult::warnings`].
    pub fn process<P, S>(&self, pages: &[P]) -> ParseResult
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let mut lines = self.classifier.classify(pages);

        // Free text with no date, label or header keyword anywhere carries
        // nothing a grammar can anchor on.
        if lines
            .iter()
            .all(|l| matches!(l.role, LineRole::Noise | LineRole::Continuation))
        {
            info!(lines = lines.len(), "document has no recognizable lines");
            return ParseResult {
                summary: AccountSummary::empty(BankId::Generic),
                transactions: Vec::new(),
                warnings: vec![Diagnostic::fatal(
                    DiagnosticKind::DocumentEmpty,
                    "document has no recognizable lines",
                )],
                lines,
            };
        }

        let detection = self.detector.detect(&lines);
        let bank = detection.bank;
        let mut warnings: Vec<Diagnostic> = detection.diagnostic.into_iter().collect();

        let mut grammar = StatementGrammar::new(bank, &self.config.grammar);
        let mut tuples = Vec::new();
        for line in &lines {
            tuples.extend(grammar.consume(line));
        }
        let output = grammar.finalize();
        tuples.extend(output.tuples);
        warnings.extend(output.diagnostics);
        let mut reclassified = output.reclassified;
        debug!(bank = %bank, tuples = tuples.len(), "grammar finished");

        let builder = RecordBuilder::new(profile(bank), &output.summary, &self.config.validation);
        let mut transactions = Vec::with_capacity(tuples.len());
        for tuple in &tuples {
            match builder.build(tuple, &mut warnings) {
                Ok(transaction) => transactions.push(transaction),
                Err(err) => {
                    let mut diagnostic = Diagnostic::warn(
                        DiagnosticKind::FieldValidationFailed,
                        format!("record demoted to noise: {err}"),
                    );
                    if let Some(first) = tuple.source_line_refs.first() {
                        diagnostic = diagnostic.at(*first);
                    }
                    warnings.push(diagnostic);
                    reclassified.extend(
                        tuple
                            .source_line_refs
                            .iter()
                            .map(|at| (*at, LineRole::Noise)),
                    );
                }
            }
        }

        if self.source == TextSource::Ocr && self.config.validation.ocr_lowers_confidence {
            for transaction in &mut transactions {
                transaction.confidence = Confidence::Low;
            }
            warnings.push(Diagnostic::info(
                DiagnosticKind::OcrSource,
                "text recovered by OCR, all records marked low confidence",
            ));
        }

        for transaction in &mut transactions {
            transaction.category = self
                .categorizer
                .categorize(&transaction.description)
                .map(str::to_string);
        }

        apply_roles(&mut lines, &reclassified);
        flag_possible_data_loss(&lines, &mut warnings);

        info!(
            bank = %bank,
            lines = lines.len(),
            transactions = transactions.len(),
            warnings = warnings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "processed statement"
        );

        ParseResult {
            summary: output.summary,
            transactions,
            warnings,
            lines,
        }
    }

    /// Process a plain-text dump whose pages are separated by form feeds.
    pub fn process_text(&self, text: &str) -> ParseResult {
        let pages: Vec<Vec<&str>> = split_pages(text);
        self.process(&pages)
    }
}

impl Default for StatementPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExtractor for StatementPipeline {
    fn extract(&self, pages: &[Vec<String>]) -> ParseResult {
        self.process(pages)
    }

    fn extract_from_text(&self, text: &str) -> ParseResult {
        self.process_text(text)
    }
}

/// Split a form-feed separated dump into pages of lines.
pub fn split_pages(text: &str) -> Vec<Vec<&str>> {
    text.split(PAGE_BREAK)
        .map(|page| page.lines().collect())
        .collect()
}

/// Apply grammar and builder role changes; later decisions win.
fn apply_roles(lines: &mut [RawLine], reclassified: &[(LineRef, LineRole)]) {
    let roles: HashMap<LineRef, LineRole> = reclassified.iter().copied().collect();
    for line in lines.iter_mut() {
        if let Some(role) = roles.get(&line.line_ref()) {
            line.role = *role;
        }
    }
}

/// Warn about noise lines that still carry an amount and no other diagnostic.
fn flag_possible_data_loss(lines: &[RawLine], warnings: &mut Vec<Diagnostic>) {
    let reported: HashSet<LineRef> = warnings.iter().filter_map(|d| d.line_ref).collect();

    for line in lines {
        let at = line.line_ref();
        if line.role == LineRole::Noise
            && AMOUNT_SHAPED.is_match(&line.text)
            && !reported.contains(&at)
        {
            warnings.push(
                Diagnostic::warn(
                    DiagnosticKind::PossibleDataLoss,
                    format!("noise line carries an amount: {:?}", line.text.trim()),
                )
                .at(at),
            );
        }
    }
}
