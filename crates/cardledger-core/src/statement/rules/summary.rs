//! Summary label recognition and value assignment.
//!
//! Statements print account fields either inline (`Total Dues: 45,230.50`)
//! or as a row of column labels followed by a row of values. Labels are
//! matched with [`SUMMARY_LABEL`]; values are the date and amount tokens
//! that follow them, assigned left to right by kind.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::amounts::parse_amount;
use super::dates::parse_any_date;
use super::patterns::{
    CARDHOLDER_LABELLED, CARDHOLDER_TITLED, CARD_LAST_4, LEADING_DATE, SUMMARY_LABEL, VALUE_TOKEN,
};
use crate::models::profile::BankId;
use crate::models::statement::{AccountSummary, StatementPeriod};

/// An account summary field a label can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryField {
    StatementPeriod,
    StatementDate,
    PaymentDueDate,
    CreditLimit,
    AvailableCredit,
    CashLimit,
    TotalDues,
    MinimumDue,
}

/// What kind of value a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Date,
    /// Two dates.
    Period,
    Money,
}

impl SummaryField {
    const GROUPS: [(&'static str, SummaryField); 8] = [
        ("available_credit", SummaryField::AvailableCredit),
        ("cash_limit", SummaryField::CashLimit),
        ("credit_limit", SummaryField::CreditLimit),
        ("total_dues", SummaryField::TotalDues),
        ("minimum_due", SummaryField::MinimumDue),
        ("payment_due_date", SummaryField::PaymentDueDate),
        ("statement_date", SummaryField::StatementDate),
        ("statement_period", SummaryField::StatementPeriod),
    ];

    pub fn kind(&self) -> ValueKind {
        match self {
            SummaryField::StatementPeriod => ValueKind::Period,
            SummaryField::StatementDate | SummaryField::PaymentDueDate => ValueKind::Date,
            _ => ValueKind::Money,
        }
    }

    /// Field name as it appears in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            SummaryField::StatementPeriod => "statement_period",
            SummaryField::StatementDate => "statement_date",
            SummaryField::PaymentDueDate => "payment_due_date",
            SummaryField::CreditLimit => "credit_limit",
            SummaryField::AvailableCredit => "available_credit",
            SummaryField::CashLimit => "cash_limit",
            SummaryField::TotalDues => "total_dues",
            SummaryField::MinimumDue => "minimum_due",
        }
    }

    /// Fields every bank statement is expected to print.
    pub fn expected() -> [SummaryField; 4] {
        [
            SummaryField::StatementPeriod,
            SummaryField::CreditLimit,
            SummaryField::TotalDues,
            SummaryField::MinimumDue,
        ]
    }
}

/// A label found in a line, with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch {
    pub field: SummaryField,
    pub start: usize,
    pub end: usize,
}

/// A value candidate following a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueToken {
    Date(NaiveDate),
    Amount(Decimal),
}

/// All summary labels in `text`, left to right.
pub fn find_labels(text: &str) -> Vec<LabelMatch> {
    SUMMARY_LABEL
        .captures_iter(text)
        .filter_map(|caps| {
            SummaryField::GROUPS.iter().find_map(|(group, field)| {
                caps.name(group).map(|m| LabelMatch {
                    field: *field,
                    start: m.start(),
                    end: m.end(),
                })
            })
        })
        .collect()
}

/// Date and amount tokens in `text`, left to right.
pub fn value_tokens(text: &str) -> Vec<ValueToken> {
    VALUE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(m) = caps.name("date") {
                parse_any_date(m.as_str()).map(|(date, _)| ValueToken::Date(date))
            } else {
                caps.name("amount")
                    .and_then(|m| parse_amount(m.as_str()))
                    .map(ValueToken::Amount)
            }
        })
        .collect()
}

/// Whether `text` holds nothing but summary labels and their values,
/// after an optional leading date.
///
/// `31/03/2024 Total Due 5,000.00` qualifies; `15/03/2024 CREDIT LIMIT
/// ENHANCEMENT FEE 499.00` does not, since words outside any label remain.
pub fn only_labels_and_values(text: &str) -> bool {
    let body = LEADING_DATE.find(text).map_or(text, |m| &text[m.end()..]);
    let without_labels = SUMMARY_LABEL.replace_all(body, " ");
    let rest = VALUE_TOKEN.replace_all(&without_labels, " ");

    rest.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .all(|word| {
            matches!(
                word.to_ascii_lowercase().as_str(),
                "rs" | "inr" | "cr" | "dr" | "to"
            )
        })
}

/// Summary fields collected while a grammar walks a document.
///
/// Every setter keeps the first value it sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFields {
    pub statement_period: Option<StatementPeriod>,
    pub statement_date: Option<NaiveDate>,
    pub payment_due_date: Option<NaiveDate>,
    pub credit_limit: Option<Decimal>,
    pub available_credit: Option<Decimal>,
    pub cash_limit: Option<Decimal>,
    pub total_dues: Option<Decimal>,
    pub minimum_due: Option<Decimal>,
    pub card_last_4: Option<String>,
    pub cardholder_name: Option<String>,
}

impl SummaryFields {
    pub fn is_set(&self, field: SummaryField) -> bool {
        match field {
            SummaryField::StatementPeriod => self.statement_period.is_some(),
            SummaryField::StatementDate => self.statement_date.is_some(),
            SummaryField::PaymentDueDate => self.payment_due_date.is_some(),
            SummaryField::CreditLimit => self.credit_limit.is_some(),
            SummaryField::AvailableCredit => self.available_credit.is_some(),
            SummaryField::CashLimit => self.cash_limit.is_some(),
            SummaryField::TotalDues => self.total_dues.is_some(),
            SummaryField::MinimumDue => self.minimum_due.is_some(),
        }
    }

    pub fn set_date(&mut self, field: SummaryField, date: NaiveDate) {
        let slot = match field {
            SummaryField::StatementDate => &mut self.statement_date,
            SummaryField::PaymentDueDate => &mut self.payment_due_date,
            _ => return,
        };
        slot.get_or_insert(date);
    }

    pub fn set_money(&mut self, field: SummaryField, amount: Decimal) {
        let slot = match field {
            SummaryField::CreditLimit => &mut self.credit_limit,
            SummaryField::AvailableCredit => &mut self.available_credit,
            SummaryField::CashLimit => &mut self.cash_limit,
            SummaryField::TotalDues => &mut self.total_dues,
            SummaryField::MinimumDue => &mut self.minimum_due,
            _ => return,
        };
        slot.get_or_insert(amount);
    }

    pub fn set_period(&mut self, a: NaiveDate, b: NaiveDate) {
        self.statement_period
            .get_or_insert_with(|| StatementPeriod::new(a, b));
    }

    pub fn set_card_last_4(&mut self, digits: &str) {
        self.card_last_4.get_or_insert_with(|| digits.to_string());
    }

    /// Pick up a masked card number anywhere in the line.
    pub fn absorb_card_number(&mut self, text: &str) {
        if let Some(caps) = CARD_LAST_4.captures(text) {
            self.set_card_last_4(&caps[1]);
        }
    }

    /// Pick up the cardholder name from a `Name :` line or an honorific line.
    pub fn absorb_cardholder_name(&mut self, text: &str) {
        if self.cardholder_name.is_some() {
            return;
        }
        let caps = CARDHOLDER_LABELLED
            .captures(text)
            .or_else(|| CARDHOLDER_TITLED.captures(text));
        if let Some(caps) = caps {
            let name = caps["name"].split_whitespace().collect::<Vec<_>>().join(" ");
            self.cardholder_name = Some(name);
        }
    }

    pub fn into_summary(self, bank: BankId) -> AccountSummary {
        AccountSummary {
            bank,
            statement_period: self.statement_period,
            statement_date: self.statement_date,
            payment_due_date: self.payment_due_date,
            credit_limit: self.credit_limit,
            available_credit: self.available_credit,
            cash_limit: self.cash_limit,
            total_dues: self.total_dues,
            minimum_due: self.minimum_due,
            card_last_4: self.card_last_4,
            cardholder_name: self.cardholder_name,
        }
    }
}

/// Assign `tokens` to `labels` in order, each label taking the next token
/// of its kind. Returns the labels that found no value.
pub fn fill(
    fields: &mut SummaryFields,
    labels: &[SummaryField],
    tokens: &[ValueToken],
) -> Vec<SummaryField> {
    let mut unfilled = Vec::new();
    let mut cursor = 0;

    for &field in labels {
        let found = match field.kind() {
            ValueKind::Money => next_amount(tokens, &mut cursor).map(|amount| {
                fields.set_money(field, amount);
            }),
            ValueKind::Date => next_date(tokens, &mut cursor).map(|date| {
                fields.set_date(field, date);
            }),
            ValueKind::Period => {
                let start = cursor;
                match (next_date(tokens, &mut cursor), next_date(tokens, &mut cursor)) {
                    (Some(a), Some(b)) => {
                        fields.set_period(a, b);
                        Some(())
                    }
                    _ => {
                        cursor = start;
                        None
                    }
                }
            }
        };
        if found.is_none() {
            unfilled.push(field);
        }
    }

    unfilled
}

fn next_amount(tokens: &[ValueToken], cursor: &mut usize) -> Option<Decimal> {
    while let Some(token) = tokens.get(*cursor) {
        *cursor += 1;
        if let ValueToken::Amount(amount) = token {
            return Some(*amount);
        }
    }
    None
}

fn next_date(tokens: &[ValueToken], cursor: &mut usize) -> Option<NaiveDate> {
    while let Some(token) = tokens.get(*cursor) {
        *cursor += 1;
        if let ValueToken::Date(date) = token {
            return Some(*date);
        }
    }
    None
}

/// Extract `label: value` pairs printed on one line.
///
/// Each label reads values only from the text between it and the next
/// label. Returns the labels that had no value of their kind.
pub fn extract_inline(fields: &mut SummaryFields, text: &str) -> Vec<SummaryField> {
    let labels = find_labels(text);
    let mut unfilled = Vec::new();

    for (i, label) in labels.iter().enumerate() {
        let end = labels.get(i + 1).map_or(text.len(), |next| next.start);
        let tokens = value_tokens(&text[label.end..end]);
        unfilled.extend(fill(fields, &[label.field], &tokens));
    }

    unfilled
}
