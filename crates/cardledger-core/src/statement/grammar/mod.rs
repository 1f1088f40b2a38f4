//! Per-bank transaction grammars.
//!
//! Every bank shares one line-oriented state machine ([`StatementGrammar`]);
//! what differs is the [`Dialect`]: the row shape, optional bank-specific
//! summary rows, the Axis split-row layout and a few behavior switches.
//! Dialects are static tables selected by [`BankId`], so adding a bank means
//! adding one profile and one dialect module.

mod axis;
mod generic;
mod hdfc;
mod icici;
mod idfc;
mod indian_bank;

use regex::Regex;
use tracing::debug;

use super::rules::patterns::GENERIC_ROW;
use super::rules::{
    extract_inline, fill, find_labels, only_labels_and_values, parse_amount_token,
    resolve_direction, value_tokens, SummaryField, SummaryFields,
};
use crate::models::config::GrammarConfig;
use crate::models::profile::{profile, BankId, BankProfile};
use crate::models::statement::{
    AccountSummary, Diagnostic, DiagnosticKind, LineRef, LineRole, RawFieldTuple, RawLine,
};

/// Fields cut out of one transaction row, still as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub date_text: String,
    pub description: String,
    /// Amount cell including any sign, parentheses or Dr/Cr marker.
    pub amount_cell: String,
}

/// Layout where the date sits alone on one line and the rest of the row
/// follows on the next.
#[derive(Debug, Clone, Copy)]
pub struct SplitRow {
    pub date_line: fn(&str) -> Option<String>,
    /// Returns description and amount cell.
    pub body: fn(&str) -> Option<(String, String)>,
}

/// Bank-specific grammar behavior.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    /// Parse a dated line as a transaction row.
    pub parse_row: fn(&str) -> Option<RowFields>,
    /// Absorb a bank-specific summary row; returns whether the line was one.
    pub summary_row: fn(&str, &mut SummaryFields) -> bool,
    pub split_row: Option<SplitRow>,
    /// Labels printed without values take their values from the next line.
    pub queue_labels: bool,
    /// Summary lines move the grammar into `InSummary`.
    pub summary_phase: bool,
    /// Skip `SeekingHeader` entirely.
    pub starts_in_transactions: bool,
}

/// Dialect for a bank.
pub fn dialect(bank: BankId) -> &'static Dialect {
    match bank {
        BankId::Hdfc => &hdfc::DIALECT,
        BankId::Icici => &icici::DIALECT,
        BankId::Axis => &axis::DIALECT,
        BankId::IdfcFirst => &idfc::DIALECT,
        BankId::IndianBank => &indian_bank::DIALECT,
        BankId::Generic => &generic::DIALECT,
    }
}

/// Cut a row with `date`, `desc` and `amount` groups out of `text`.
fn row_from(pattern: &Regex, text: &str) -> Option<RowFields> {
    let caps = pattern.captures(text)?;
    Some(RowFields {
        date_text: caps["date"].to_string(),
        description: caps.name("desc").map_or("", |m| m.as_str()).to_string(),
        amount_cell: caps["amount"].to_string(),
    })
}

fn no_summary_row(_text: &str, _fields: &mut SummaryFields) -> bool {
    false
}

/// Whether `text` looks like a dated row with a trailing amount, whatever
/// the bank's own row shape accepts. Date ranges do not count.
fn row_shaped(text: &str) -> bool {
    GENERIC_ROW.captures(text).is_some_and(|caps| {
        caps.name("amount").is_some_and(|amount| {
            text[..amount.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace)
        })
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Grammar phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    SeekingHeader,
    InTransactions,
    InSummary,
}

#[derive(Debug, Clone)]
struct PendingRow {
    tuple: RawFieldTuple,
    continuations: usize,
}

/// Mutable cursor for one document. Never outlives the document.
#[derive(Debug, Default)]
pub struct ParseState {
    pub phase: Phase,
    pending: Option<PendingRow>,
    /// Date line waiting for its split-row body.
    carried_date: Option<(String, LineRef)>,
    queued_labels: Vec<SummaryField>,
    fields: SummaryFields,
    seen_rows: bool,
    reclassified: Vec<(LineRef, LineRole)>,
    diagnostics: Vec<Diagnostic>,
}

/// Everything a grammar hands back once the document is exhausted.
#[derive(Debug, Clone)]
pub struct GrammarOutput {
    /// Tuple still pending at end of document, if any.
    pub tuples: Vec<RawFieldTuple>,
    pub summary: AccountSummary,
    /// Role changes in the order they were decided; later entries win.
    pub reclassified: Vec<(LineRef, LineRole)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Line-oriented state machine turning classified lines into field tuples.
#[derive(Debug)]
pub struct StatementGrammar {
    bank: BankId,
    profile: &'static BankProfile,
    dialect: &'static Dialect,
    max_continuation_lines: usize,
    state: ParseState,
}

impl StatementGrammar {
    pub fn new(bank: BankId, config: &GrammarConfig) -> Self {
        let dialect = dialect(bank);
        let state = ParseState {
            phase: if dialect.starts_in_transactions {
                Phase::InTransactions
            } else {
                Phase::SeekingHeader
            },
            ..ParseState::default()
        };

        Self {
            bank,
            profile: profile(bank),
            dialect,
            max_continuation_lines: config.max_continuation_lines,
            state,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Feed one line, in document order. Returns tuples completed by it.
    ///
    /// A row stays pending until a line that cannot continue it arrives, so
    /// tuples are emitted one line late.
    pub fn consume(&mut self, line: &RawLine) -> Vec<RawFieldTuple> {
        let mut emitted = Vec::new();
        if line.role == LineRole::Noise {
            return emitted;
        }

        let text = line.text.trim();
        let at = line.line_ref();

        if let Some((date_text, date_ref)) = self.state.carried_date.take() {
            match self.dialect.split_row.and_then(|split| (split.body)(text)) {
                Some((description, amount_cell)) => {
                    let row = RowFields {
                        date_text,
                        description,
                        amount_cell,
                    };
                    if self.start_row(row, vec![date_ref, at]) {
                        self.reclassify(at, LineRole::Transaction);
                    }
                    return emitted;
                }
                None => self.demote(date_ref, &date_text),
            }
        }

        if (self.dialect.summary_row)(text, &mut self.state.fields) {
            self.state.queued_labels.clear();
            self.flush(&mut emitted);
            self.enter_summary();
            self.reclassify(at, LineRole::Summary);
            return emitted;
        }

        if self.fill_queued_labels(line.role, text) {
            self.flush(&mut emitted);
            self.reclassify(at, LineRole::Summary);
            return emitted;
        }

        match line.role {
            LineRole::Transaction => self.transaction_line(text, at, &mut emitted),
            LineRole::Continuation => self.continuation_line(text, at),
            LineRole::Summary => {
                self.flush(&mut emitted);
                self.absorb(text);
                self.enter_summary();
            }
            LineRole::Header => {
                self.flush(&mut emitted);
                self.absorb(text);
            }
            LineRole::Noise => {}
        }

        emitted
    }

    /// Close the document: emit the pending tuple and build the summary.
    pub fn finalize(mut self) -> GrammarOutput {
        let mut tuples = Vec::new();
        self.flush(&mut tuples);

        if let Some((date_text, at)) = self.state.carried_date.take() {
            self.demote(at, &date_text);
        }

        if self.bank != BankId::Generic {
            for field in SummaryField::expected() {
                if !self.state.fields.is_set(field) {
                    self.state.diagnostics.push(Diagnostic::info(
                        DiagnosticKind::SummaryFieldMissing,
                        format!("summary field {} not found", field.name()),
                    ));
                }
            }
        }

        GrammarOutput {
            tuples,
            summary: self.state.fields.into_summary(self.bank),
            reclassified: self.state.reclassified,
            diagnostics: self.state.diagnostics,
        }
    }

    fn transaction_line(&mut self, text: &str, at: LineRef, emitted: &mut Vec<RawFieldTuple>) {
        // A dated line made only of summary labels and values is summary,
        // unless a multi-line row is still being assembled. A row whose
        // description merely contains a label stays a transaction.
        let mid_continuation = self
            .state
            .pending
            .as_ref()
            .is_some_and(|p| p.continuations > 0);
        let labelled = !find_labels(text).is_empty();
        let row = (self.dialect.parse_row)(text);

        if labelled && !mid_continuation && (row.is_none() || only_labels_and_values(text)) {
            self.flush(emitted);
            self.absorb(text);
            self.enter_summary();
            self.reclassify(at, LineRole::Summary);
            return;
        }

        if let Some(row) = row {
            self.flush(emitted);
            if labelled {
                self.state.diagnostics.push(
                    Diagnostic::info(
                        DiagnosticKind::AmbiguousLine,
                        format!("row kept as transaction despite summary label: {text:?}"),
                    )
                    .at(at),
                );
            }
            self.start_row(row, vec![at]);
            return;
        }

        if let Some(date_text) = self.dialect.split_row.and_then(|split| (split.date_line)(text)) {
            self.flush(emitted);
            self.state.carried_date = Some((date_text, at));
            self.enter(Phase::InTransactions);
            return;
        }

        if self.state.phase == Phase::SeekingHeader && !row_shaped(text) {
            self.absorb(text);
            self.reclassify(at, LineRole::Header);
        } else {
            self.flush(emitted);
            self.demote(at, text);
        }
    }

    fn continuation_line(&mut self, text: &str, at: LineRef) {
        let max = self.max_continuation_lines;
        match self
            .state
            .pending
            .as_ref()
            .map(|p| p.continuations >= max)
        {
            Some(false) => {
                if let Some(pending) = self.state.pending.as_mut() {
                    let extra = collapse_whitespace(text);
                    if !extra.is_empty() {
                        if !pending.tuple.description.is_empty() {
                            pending.tuple.description.push(' ');
                        }
                        pending.tuple.description.push_str(&extra);
                    }
                    pending.tuple.source_line_refs.push(at);
                    pending.continuations += 1;
                }
            }
            Some(true) => self.reclassify(at, LineRole::Noise),
            None if self.state.phase != Phase::InTransactions || !self.state.seen_rows => {
                self.absorb(text);
                self.reclassify(at, LineRole::Header);
            }
            None => self.reclassify(at, LineRole::Noise),
        }
    }

    /// Try to fill labels queued by the previous line from this line's values.
    fn fill_queued_labels(&mut self, role: LineRole, text: &str) -> bool {
        if self.state.queued_labels.is_empty() {
            return false;
        }
        let queued = std::mem::take(&mut self.state.queued_labels);

        if role == LineRole::Transaction && (self.dialect.parse_row)(text).is_some() {
            return false;
        }
        if !find_labels(text).is_empty() {
            return false;
        }

        let tokens = value_tokens(text);
        let unfilled = fill(&mut self.state.fields, &queued, &tokens);
        unfilled.len() < queued.len()
    }

    fn absorb(&mut self, text: &str) {
        self.state.fields.absorb_card_number(text);
        self.state.fields.absorb_cardholder_name(text);
        let unfilled = extract_inline(&mut self.state.fields, text);
        if self.dialect.queue_labels && !unfilled.is_empty() {
            self.state.queued_labels = unfilled;
        }
    }

    /// Open a pending tuple. The caller flushes any previous one first.
    fn start_row(&mut self, row: RowFields, refs: Vec<LineRef>) -> bool {
        let Some(token) = parse_amount_token(&row.amount_cell) else {
            for at in &refs {
                self.demote(*at, &row.amount_cell);
            }
            return false;
        };
        let (direction, sign_missing) =
            resolve_direction(self.profile.amount_sign_convention, &token);

        self.state.pending = Some(PendingRow {
            tuple: RawFieldTuple {
                date_text: row.date_text,
                description: collapse_whitespace(&row.description),
                amount_text: token.digits,
                direction,
                sign_missing,
                source_line_refs: refs,
            },
            continuations: 0,
        });
        self.state.seen_rows = true;
        self.enter(Phase::InTransactions);
        true
    }

    fn flush(&mut self, emitted: &mut Vec<RawFieldTuple>) {
        if let Some(pending) = self.state.pending.take() {
            emitted.push(pending.tuple);
        }
    }

    fn enter_summary(&mut self) {
        if self.dialect.summary_phase {
            self.enter(Phase::InSummary);
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.state.phase != phase {
            debug!(bank = %self.bank, from = ?self.state.phase, to = ?phase, "grammar phase change");
            self.state.phase = phase;
        }
    }

    fn reclassify(&mut self, at: LineRef, role: LineRole) {
        self.state.reclassified.push((at, role));
    }

    fn demote(&mut self, at: LineRef, text: &str) {
        self.reclassify(at, LineRole::Noise);
        self.state.diagnostics.push(
            Diagnostic::warn(
                DiagnosticKind::LineUnparseable,
                format!("unparseable line demoted to noise: {text:?}"),
            )
            .at(at),
        );
    }
}
