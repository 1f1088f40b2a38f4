//! Static bank profiles: identity, signatures, date format and sign convention.
//!
//! Profiles are built once per process and only ever read afterwards, so they
//! can be shared freely across threads processing different documents.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Supported statement issuers. `Generic` is the last-resort fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankId {
    Hdfc,
    Icici,
    Axis,
    IdfcFirst,
    IndianBank,
    Generic,
}

impl BankId {
    /// All banks in declaration order (detection tie-break order).
    pub const ALL: [BankId; 6] = [
        BankId::Hdfc,
        BankId::Icici,
        BankId::Axis,
        BankId::IdfcFirst,
        BankId::IndianBank,
        BankId::Generic,
    ];

    /// Human-readable bank name.
    pub fn name(&self) -> &'static str {
        match self {
            BankId::Hdfc => "HDFC Bank",
            BankId::Icici => "ICICI Bank",
            BankId::Axis => "Axis Bank",
            BankId::IdfcFirst => "IDFC First Bank",
            BankId::IndianBank => "Indian Bank",
            BankId::Generic => "Unknown (generic)",
        }
    }

    fn index(&self) -> usize {
        match self {
            BankId::Hdfc => 0,
            BankId::Icici => 1,
            BankId::Axis => 2,
            BankId::IdfcFirst => 3,
            BankId::IndianBank => 4,
            BankId::Generic => 5,
        }
    }
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How transaction row dates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `01/03/2024`, `01-03-24`, `01.03.2024`
    DayMonthYear,
    /// `01-MAR-24`, `01 Mar 2024`
    DayMonthNameYear,
    /// `March 1, 2024`
    MonthNameDayYear,
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::DayMonthYear => f.write_str("DD/MM/YYYY"),
            DateFormat::DayMonthNameYear => f.write_str("DD-MMM-YY"),
            DateFormat::MonthNameDayYear => f.write_str("Month D, YYYY"),
        }
    }
}

/// How the direction of an amount is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// Trailing `Cr` marks a credit; anything else is a debit.
    SuffixCrDebitDefault,
    /// Every row states its direction (`+`/`-` or a `Dr`/`Cr` marker).
    ExplicitSign,
    /// Parenthesized amounts are credits.
    ParenthesesNegative,
}

impl fmt::Display for SignConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignConvention::SuffixCrDebitDefault => f.write_str("suffix Cr, debit default"),
            SignConvention::ExplicitSign => f.write_str("explicit sign"),
            SignConvention::ParenthesesNegative => f.write_str("parentheses negative"),
        }
    }
}

/// Static description of one issuer's statement dialect.
#[derive(Debug, Clone)]
pub struct BankProfile {
    pub id: BankId,
    /// Signature phrases as written in profile declarations.
    pub signatures: &'static [&'static str],
    /// Compiled, case-insensitive signature patterns (same order as `signatures`).
    pub signature_patterns: Vec<Regex>,
    pub date_format: DateFormat,
    pub amount_sign_convention: SignConvention,
}

impl BankProfile {
    fn new(
        id: BankId,
        signatures: &'static [&'static str],
        date_format: DateFormat,
        amount_sign_convention: SignConvention,
    ) -> Self {
        let signature_patterns = signatures
            .iter()
            .map(|s| signature_regex(s))
            .collect();

        Self {
            id,
            signatures,
            signature_patterns,
            date_format,
            amount_sign_convention,
        }
    }

    /// Number of distinct signatures found in `text`.
    pub fn signature_hits(&self, text: &str) -> usize {
        self.signature_patterns
            .iter()
            .filter(|p| p.is_match(text))
            .count()
    }
}

/// Compile a signature phrase into a case-insensitive, whitespace-tolerant pattern.
fn signature_regex(phrase: &str) -> Regex {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    Regex::new(&format!(r"(?i)\b{}\b", words.join(r"\s+"))).unwrap()
}

lazy_static! {
    static ref PROFILES: Vec<BankProfile> = vec![
        BankProfile::new(
            BankId::Hdfc,
            &["HDFC Bank", "Paytm HDFC", "hdfcbank.com"],
            DateFormat::DayMonthYear,
            SignConvention::SuffixCrDebitDefault,
        ),
        BankProfile::new(
            BankId::Icici,
            &["ICICI Bank", "ICICI Card", "icicibank.com"],
            DateFormat::DayMonthYear,
            SignConvention::SuffixCrDebitDefault,
        ),
        BankProfile::new(
            BankId::Axis,
            &["Axis Bank", "Axis Cards", "Flipkart Axis"],
            DateFormat::DayMonthYear,
            SignConvention::ExplicitSign,
        ),
        BankProfile::new(
            BankId::IdfcFirst,
            &["IDFC FIRST", "IDFC Bank", "idfcfirstbank.com"],
            DateFormat::DayMonthYear,
            SignConvention::SuffixCrDebitDefault,
        ),
        BankProfile::new(
            BankId::IndianBank,
            &["Indian Bank", "IBGCC", "indianbank.in"],
            DateFormat::DayMonthNameYear,
            SignConvention::ExplicitSign,
        ),
        BankProfile::new(
            BankId::Generic,
            &[],
            DateFormat::DayMonthYear,
            SignConvention::SuffixCrDebitDefault,
        ),
    ];
}

/// All bank profiles in declaration order.
pub fn profiles() -> &'static [BankProfile] {
    &PROFILES
}

/// The profile for a bank.
pub fn profile(id: BankId) -> &'static BankProfile {
    &PROFILES[id.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_follow_declaration_order() {
        for (profile, id) in profiles().iter().zip(BankId::ALL) {
            assert_eq!(profile.id, id);
            assert_eq!(super::profile(id).id, id);
        }
    }

    #[test]
    fn test_signature_is_case_and_space_insensitive() {
        let hdfc = profile(BankId::Hdfc);
        assert_eq!(hdfc.signature_hits("hdfc   BANK credit card"), 1);
        assert_eq!(hdfc.signature_hits("HDFCBANKING"), 0);
    }

    #[test]
    fn test_generic_has_no_signatures() {
        assert!(profile(BankId::Generic).signature_patterns.is_empty());
    }

    #[test]
    fn test_indian_bank_does_not_match_other_banks() {
        let indian = profile(BankId::IndianBank);
        assert_eq!(indian.signature_hits("HDFC BANK LTD"), 0);
        assert_eq!(indian.signature_hits("INDIAN BANK"), 1);
    }
}
