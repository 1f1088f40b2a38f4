//! ICICI Bank: rows carry a serial number column, an optional `IN` country
//! code and a reward-points column before the amount.

use super::{no_summary_row, row_from, Dialect, RowFields};
use crate::statement::rules::patterns::ICICI_ROW;

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: no_summary_row,
    split_row: None,
    queue_labels: true,
    summary_phase: true,
    starts_in_transactions: false,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&ICICI_ROW, text)
}
