//! Axis Bank: explicit `Dr`/`Cr` markers or signs, a split layout with the
//! date alone on its own line, and a masked-card limits row.

use super::{row_from, Dialect, RowFields, SplitRow};
use crate::statement::rules::patterns::{AXIS_LIMITS_ROW, AXIS_ROW, AXIS_SPLIT_BODY, DATE_ONLY};
use crate::statement::rules::{parse_amount, SummaryField, SummaryFields};

pub(super) static DIALECT: Dialect = Dialect {
    parse_row,
    summary_row: limits_row,
    split_row: Some(SplitRow {
        date_line,
        body: split_body,
    }),
    queue_labels: true,
    summary_phase: true,
    starts_in_transactions: false,
};

fn parse_row(text: &str) -> Option<RowFields> {
    row_from(&AXIS_ROW, text)
}

fn date_line(text: &str) -> Option<String> {
    DATE_ONLY.captures(text).map(|caps| caps["date"].to_string())
}

fn split_body(text: &str) -> Option<(String, String)> {
    let caps = AXIS_SPLIT_BODY.captures(text)?;
    Some((caps["desc"].to_string(), caps["amount"].to_string()))
}

/// `<bin>******1234  <credit limit>  <available credit>`
fn limits_row(text: &str, fields: &mut SummaryFields) -> bool {
    let Some(caps) = AXIS_LIMITS_ROW.captures(text) else {
        return false;
    };

    fields.set_card_last_4(&caps["last4"]);
    if let Some(limit) = parse_amount(&caps["limit"]) {
        fields.set_money(SummaryField::CreditLimit, limit);
    }
    if let Some(available) = parse_amount(&caps["available"]) {
        fields.set_money(SummaryField::AvailableCredit, available);
    }
    true
}
