//! Amount tokens and sign conventions.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_TOKEN;
use crate::models::profile::SignConvention;
use crate::models::statement::Direction;

/// Printed direction marker next to an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Cr,
    Dr,
}

/// An amount as printed on a row, split into its unsigned digits and
/// whatever polarity hints surround them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountToken {
    /// Unsigned digits with grouping commas kept (e.g. `1,250.00`).
    pub digits: String,
    /// Leading `+` or `-`, if printed.
    pub leading_sign: Option<char>,
    /// Amount was wrapped in parentheses.
    pub parenthesized: bool,
    /// `Cr`/`Dr` marker before or after the digits.
    pub marker: Option<Marker>,
}

/// Split an amount cell into digits and polarity hints.
pub fn parse_amount_token(text: &str) -> Option<AmountToken> {
    let caps = AMOUNT_TOKEN.captures(text)?;

    let marker = caps
        .name("post")
        .or_else(|| caps.name("pre"))
        .and_then(|m| match m.as_str().to_ascii_lowercase().as_str() {
            "cr" => Some(Marker::Cr),
            "dr" => Some(Marker::Dr),
            _ => None,
        });

    Some(AmountToken {
        digits: caps["digits"].to_string(),
        leading_sign: caps.name("sign").and_then(|m| m.as_str().chars().next()),
        parenthesized: caps.name("open").is_some() && caps.name("close").is_some(),
        marker,
    })
}

/// Parse unsigned amount text (`1,250.00`) into a decimal.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Resolve a token's direction under a bank's sign convention.
///
/// Returns the direction and whether the convention required a sign that
/// was not printed.
pub fn resolve_direction(convention: SignConvention, token: &AmountToken) -> (Direction, bool) {
    match convention {
        SignConvention::SuffixCrDebitDefault => match token.marker {
            Some(Marker::Cr) => (Direction::Credit, false),
            _ => (Direction::Debit, false),
        },
        SignConvention::ExplicitSign => match (token.leading_sign, token.marker) {
            (Some('-'), _) | (_, Some(Marker::Cr)) => (Direction::Credit, false),
            (Some('+'), _) | (_, Some(Marker::Dr)) => (Direction::Debit, false),
            _ => (Direction::Debit, true),
        },
        SignConvention::ParenthesesNegative => {
            if token.parenthesized {
                (Direction::Credit, false)
            } else {
                (Direction::Debit, false)
            }
        }
    }
}
