//! Fallback grammar for unidentified issuers: any leading date, optional
//! text and a trailing numeric token. No summary phase.

use super::{no_summary_row, row_from, Dialect, RowFields};
use crate::statement::rules::patterns::GENERIC_ROW;

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: no_summary_row,
    split_row: None,
    queue_labels: false,
    summary_phase: false,
    starts_in_transactions: true,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&GENERIC_ROW, text)
}
