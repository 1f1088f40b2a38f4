//! IDFC First Bank: amounts are prefixed with a rupee glyph that text
//! recovery often renders as `r`.

use super::{no_summary_row, row_from, Dialect, RowFields};
use crate::statement::rules::patterns::IDFC_ROW;

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: no_summary_row,
    split_row: None,
    queue_labels: true,
    summary_phase: true,
    starts_in_transactions: false,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&IDFC_ROW, text)
}
