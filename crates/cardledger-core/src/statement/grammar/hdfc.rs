//! HDFC Bank: `DD/MM/YYYY [HH:MM[:SS]] <description> <amount>[ Cr]`.

use super::{no_summary_row, row_from, Dialect, RowFields};
use crate::statement::rules::patterns::HDFC_ROW;

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: no_summary_row,
    split_row: None,
    queue_labels: true,
    summary_phase: true,
    starts_in_transactions: false,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&HDFC_ROW, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_time() {
        let row = parse_row("01/03/2024 14:22:05 UBER INDIA BANGALORE 312.40").unwrap();
        assert_eq!(row.date_text, "01/03/2024");
        assert_eq!(row.description, "UBER INDIA BANGALORE");
        assert_eq!(row.amount_cell, "312.40");
    }

    #[test]
    fn test_credit_row() {
        let row = parse_row("10/03/2024 NETBANKING PAYMENT RECEIVED 5,000.00 Cr").unwrap();
        assert_eq!(row.amount_cell, "5,000.00 Cr");
    }

    #[test]
    fn test_rejects_values_row() {
        assert!(parse_row("15/04/2024 45,230.50 2,262.00").is_none());
    }
}
