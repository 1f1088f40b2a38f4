//! Canonical record building and validation.
//!
//! Turns grammar field tuples into typed [`Transaction`]s. A tuple whose date
//! or amount cannot be read at all is an error; every softer problem keeps
//! the record and marks it low-confidence with a diagnostic.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;

use super::rules::{parse_amount, parse_any_date, parse_date};
use crate::error::ValidationError;
use crate::models::config::ValidationConfig;
use crate::models::profile::BankProfile;
use crate::models::statement::{
    AccountSummary, Confidence, Diagnostic, DiagnosticKind, RawFieldTuple, Transaction,
};

/// Builds transactions for one document.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    profile: &'a BankProfile,
    window: Option<(NaiveDate, NaiveDate)>,
    max_fraction_digits: u32,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(profile: &'a BankProfile, summary: &AccountSummary, config: &ValidationConfig) -> Self {
        Self {
            profile,
            window: date_window(summary, config.days_before_period),
            max_fraction_digits: config.max_fraction_digits,
        }
    }

    /// Inclusive range of plausible transaction dates, if one is known.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    /// Build and validate one record.
    ///
    /// Soft validation failures are appended to `diagnostics` and lower the
    /// record's confidence.
    pub fn build(
        &self,
        tuple: &RawFieldTuple,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Transaction, ValidationError> {
        let mut issues = Vec::new();

        let date = match parse_date(&tuple.date_text, self.profile.date_format) {
            Some(date) => date,
            None => match parse_any_date(&tuple.date_text) {
                Some((date, _)) => {
                    issues.push(format!(
                        "date {:?} is not in the bank's {} format",
                        tuple.date_text, self.profile.date_format
                    ));
                    date
                }
                None => {
                    return Err(ValidationError::UnparseableDate {
                        value: tuple.date_text.clone(),
                    });
                }
            },
        };

        if let Some((start, end)) = self.window {
            if date < start || date > end {
                issues.push(format!("date {date} outside statement window {start}..{end}"));
            }
        }

        let amount = parse_amount(&tuple.amount_text).ok_or_else(|| {
            ValidationError::UnparseableAmount {
                value: tuple.amount_text.clone(),
            }
        })?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount {
                value: tuple.amount_text.clone(),
            });
        }
        if amount.scale() > self.max_fraction_digits {
            issues.push(format!(
                "amount {} has more than {} fractional digits",
                tuple.amount_text, self.max_fraction_digits
            ));
        }

        let description = tuple.description.trim().to_string();
        if description.is_empty() {
            issues.push("empty description".to_string());
        }

        if tuple.sign_missing {
            issues.push(format!(
                "no sign printed for {}, assumed debit",
                tuple.amount_text
            ));
        }

        let confidence = if issues.is_empty() {
            Confidence::High
        } else {
            let mut diagnostic =
                Diagnostic::warn(DiagnosticKind::FieldValidationFailed, issues.join("; "));
            if let Some(first) = tuple.source_line_refs.first() {
                diagnostic = diagnostic.at(*first);
            }
            diagnostics.push(diagnostic);
            Confidence::Low
        };

        Ok(Transaction {
            date,
            description,
            amount,
            direction: tuple.direction,
            category: None,
            source_line_refs: tuple.source_line_refs.clone(),
            confidence,
        })
    }
}

/// `[period.start - days, period.end]`, or when only the statement date is
/// known, `[statement_date - 1 month - days, statement_date]`.
fn date_window(summary: &AccountSummary, days_before_period: i64) -> Option<(NaiveDate, NaiveDate)> {
    let slack = Days::new(days_before_period.max(0) as u64);

    if let Some(period) = summary.statement_period {
        let start = period.start.checked_sub_days(slack)?;
        return Some((start, period.end));
    }

    let statement_date = summary.statement_date?;
    let start = statement_date
        .checked_sub_months(Months::new(1))?
        .checked_sub_days(slack)?;
    Some((start, statement_date))
}
