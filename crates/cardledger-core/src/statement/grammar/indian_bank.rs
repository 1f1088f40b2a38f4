//! Indian Bank: `DD-MMM-YY` row dates with the `Dr`/`Cr` marker printed
//! before the amount, and one row holding statement date, period and due date.

use super::{row_from, Dialect, RowFields};
use crate::models::profile::DateFormat;
use crate::statement::rules::patterns::{INDIAN_BANK_DATES_ROW, INDIAN_BANK_ROW};
use crate::statement::rules::{parse_date, SummaryField, SummaryFields};

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: dates_row,
    split_row: None,
    queue_labels: true,
    summary_phase: true,
    starts_in_transactions: false,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&INDIAN_BANK_ROW, text)
}

/// `<statement date> <from> - <to> <due date>`, all `DD-MM-YYYY`.
fn dates_row(text: &str, fields: &mut SummaryFields) -> bool {
    let Some(caps) = INDIAN_BANK_DATES_ROW.captures(text) else {
        return false;
    };
    let date = |name: &str| parse_date(&caps[name], DateFormat::DayMonthYear);

    if let Some(statement) = date("statement") {
        fields.set_date(SummaryField::StatementDate, statement);
    }
    if let (Some(from), Some(to)) = (date("from"), date("to")) {
        fields.set_period(from, to);
    }
    if let Some(due) = date("due") {
        fields.set_date(SummaryField::PaymentDueDate, due);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::statement::StatementPeriod;

    #[test]
    fn test_marker_before_amount() {
        let row = parse_row("05-MAR-24 SWIGGY BANGALORE Dr 450.00").unwrap();
        assert_eq!(row.date_text, "05-MAR-24");
        assert_eq!(row.description, "SWIGGY BANGALORE");
        assert_eq!(row.amount_cell, "Dr 450.00");
    }

    #[test]
    fn test_dates_row() {
        let mut fields = SummaryFields::default();
        assert!(dates_row("01-04-2024 01-03-2024 - 31-03-2024 18-04-2024", &mut fields));

        let ymd = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        assert_eq!(fields.statement_date, Some(ymd(4, 1)));
        assert_eq!(
            fields.statement_period,
            Some(StatementPeriod::new(ymd(3, 1), ymd(3, 31)))
        );
        assert_eq!(fields.payment_due_date, Some(ymd(4, 18)));
    }
}
