//! Statement data models: classified lines, canonical transactions, the
//! account summary and the final parse result.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::BankId;

/// Position of a line inside the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRef {
    /// Zero-based page index.
    pub page_index: usize,
    /// Zero-based line index within the page.
    pub line_index: usize,
}

impl LineRef {
    pub fn new(page_index: usize, line_index: usize) -> Self {
        Self {
            page_index,
            line_index,
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} line {}", self.page_index + 1, self.line_index + 1)
    }
}

/// How the page text was recovered, as reported by the extraction step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded text layer.
    #[default]
    Digital,
    /// Optical character recognition.
    Ocr,
}

/// Structural role of a raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    /// Statement header or column header text.
    Header,
    /// A dated, amount-bearing transaction row.
    Transaction,
    /// Text extending the previous transaction row.
    Continuation,
    /// Totals, dues and limits.
    Summary,
    /// Blank lines, page markers and anything demoted by a grammar.
    Noise,
}

/// A single line of recovered text with its structural role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    pub page_index: usize,
    pub line_index: usize,
    pub text: String,
    pub role: LineRole,
}

impl RawLine {
    pub fn line_ref(&self) -> LineRef {
        LineRef::new(self.page_index, self.line_index)
    }
}

/// Polarity of a transaction amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Spend.
    Debit,
    /// Payment or refund.
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Debit => f.write_str("debit"),
            Direction::Credit => f.write_str("credit"),
        }
    }
}

/// Whether a record passed every validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Low => f.write_str("low"),
        }
    }
}

/// Field tuple emitted by a bank grammar, before typing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFieldTuple {
    /// Date token exactly as printed.
    pub date_text: String,
    /// Description, continuation lines already joined with single spaces.
    pub description: String,
    /// Unsigned amount text with sign markers stripped (e.g. `1,250.00`).
    pub amount_text: String,
    /// Direction resolved from the bank's sign convention.
    pub direction: Direction,
    /// The bank requires an explicit sign and none was printed.
    pub sign_missing: bool,
    /// Lines this tuple was assembled from, in document order.
    pub source_line_refs: Vec<LineRef>,
}

/// A canonical ledger entry.
///
/// `amount` is always strictly positive; polarity lives only in `direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub source_line_refs: Vec<LineRef>,
    pub confidence: Confidence,
}

impl Transaction {
    /// Amount with credits negated, for totals.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Debit => self.amount,
            Direction::Credit => -self.amount,
        }
    }
}

/// Date range a statement covers (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    /// Build a period, swapping the bounds if they were printed in reverse.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }
}

/// Account-level fields. Anything not found stays absent, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub bank: BankId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_period: Option<StatementPeriod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_due_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_credit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_limit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_dues: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_due: Option<Decimal>,

    /// Last four digits of the masked card number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last_4: Option<String>,

    /// Cardholder name as printed, without honorific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
}

impl AccountSummary {
    /// An empty summary for the given bank.
    pub fn empty(bank: BankId) -> Self {
        Self {
            bank,
            statement_period: None,
            statement_date: None,
            payment_due_date: None,
            credit_limit: None,
            available_credit: None,
            cash_limit: None,
            total_dues: None,
            minimum_due: None,
            card_last_4: None,
            cardholder_name: None,
        }
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warn => f.write_str("WARN"),
            Severity::Fatal => f.write_str("FATAL"),
        }
    }
}

/// What went wrong (or was degraded) while processing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No bank signature matched; the generic grammar was used.
    BankNotIdentified,
    /// A transaction-shaped line could not be parsed and was demoted to noise.
    LineUnparseable,
    /// A record failed validation; it was kept at low confidence or demoted.
    FieldValidationFailed,
    /// A summary field was not found and is left absent.
    SummaryFieldMissing,
    /// The document has no recognizable lines.
    DocumentEmpty,
    /// A noise line carries an amount-shaped token.
    PossibleDataLoss,
    /// Text came from OCR; record confidence was lowered.
    OcrSource,
    /// A row carries a summary label but was kept as a transaction.
    AmbiguousLine,
}

/// A diagnostic attached to a parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ref: Option<LineRef>,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            line_ref: None,
        }
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, message)
    }

    pub fn warn(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, kind, message)
    }

    pub fn fatal(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, kind, message)
    }

    pub fn at(mut self, line_ref: LineRef) -> Self {
        self.line_ref = Some(line_ref);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_ref {
            Some(at) => write!(f, "[{}] {} ({})", self.severity, self.message, at),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Final output of the extraction pipeline for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub summary: AccountSummary,
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<Diagnostic>,
    /// Classified lines after grammar reclassification, for audit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<RawLine>,
}

impl ParseResult {
    /// Whether a fatal diagnostic was recorded.
    pub fn is_fatal(&self) -> bool {
        self.warnings.iter().any(|d| d.severity == Severity::Fatal)
    }

    /// Diagnostics of a given kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter().filter(move |d| d.kind == kind)
    }

    /// Sum of debit amounts.
    pub fn total_debits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.direction == Direction::Debit)
            .map(|t| t.amount)
            .sum()
    }

    /// Sum of credit amounts.
    pub fn total_credits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.direction == Direction::Credit)
            .map(|t| t.amount)
            .sum()
    }
}
