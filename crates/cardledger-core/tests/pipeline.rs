//! Integration tests for the extraction pipeline.
//!
//! Covers the documented scenarios and the properties every result must
//! hold: idempotence, conservation, the sign invariant, category
//! determinism and detection monotonicity.

mod common;

use std::str::FromStr;

use cardledger_core::models::profile::profiles;
use cardledger_core::{
    BankId, Categorizer, DiagnosticKind, Direction, LineRole, Severity, StatementExtractor,
    StatementPipeline,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_hdfc_three_lines() {
    let result = StatementPipeline::new().process(&[[
        "HDFC BANK CREDIT CARD STATEMENT",
        "01/03/2024 AMAZON PAY 1,250.00",
        "Total Due: 5,000.00",
    ]]);

    assert_eq!(result.summary.bank, BankId::Hdfc);
    assert_eq!(result.transactions.len(), 1);
    let txn = &result.transactions[0];
    assert_eq!(txn.direction, Direction::Debit);
    assert_eq!(txn.amount, Decimal::from_str("1250.00").unwrap());
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(result.summary.total_dues, Decimal::from_str("5000.00").ok());
}

#[test]
fn test_scenario_continuation_line() {
    let result = StatementPipeline::new().process(&[[
        "HDFC Bank",
        "05/03/2024 SWIGGY 450.00",
        "BANGALORE IN",
    ]]);

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].description, "SWIGGY BANGALORE IN");
}

#[test]
fn test_scenario_suffix_cr() {
    let result = StatementPipeline::new().process(&[[
        "HDFC Bank",
        "07/03/2024 REVERSAL 120.00 Cr",
    ]]);

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].direction, Direction::Credit);
    assert_eq!(
        result.transactions[0].amount,
        Decimal::from_str("120.00").unwrap()
    );
}

#[test]
fn test_scenario_empty_document() {
    let pages: Vec<Vec<String>> = vec![vec![String::new(), "   ".to_string()]];
    let result = StatementPipeline::new().extract(&pages);

    assert!(result.transactions.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, DiagnosticKind::DocumentEmpty);
    assert_eq!(result.warnings[0].severity, Severity::Fatal);
}

#[test]
fn test_scenario_unknown_bank() {
    let result = StatementPipeline::new().process(&common::generic());

    assert_eq!(result.summary.bank, BankId::Generic);
    assert_eq!(
        result
            .diagnostics_of(DiagnosticKind::BankNotIdentified)
            .count(),
        1
    );
    assert_eq!(result.transactions.len(), 2);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_idempotent() {
    let pipeline = StatementPipeline::new();
    for sample in common::all() {
        let first = pipeline.process(&sample);
        let second = pipeline.process(&sample);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_conservation() {
    let pipeline = StatementPipeline::new();
    for sample in common::all() {
        let result = pipeline.process(&sample);

        for line in result.lines.iter().filter(|l| l.role == LineRole::Transaction) {
            let owners = result
                .transactions
                .iter()
                .filter(|t| t.source_line_refs.contains(&line.line_ref()))
                .count();
            assert_eq!(owners, 1, "line {:?} owned by {} transactions", line.text, owners);
        }
    }
}

#[test]
fn test_amounts_strictly_positive() {
    let pipeline = StatementPipeline::new();
    for sample in common::all() {
        for txn in pipeline.process(&sample).transactions {
            assert!(txn.amount > Decimal::ZERO, "{txn:?}");
        }
    }
}

#[test]
fn test_category_determinism() {
    let pipeline = StatementPipeline::new();
    let categorizer = Categorizer::builtin();

    for sample in common::all() {
        for txn in pipeline.process(&sample).transactions {
            assert_eq!(
                txn.category.as_deref(),
                categorizer.categorize(&txn.description)
            );
        }
    }
}

#[test]
fn test_detection_monotonicity() {
    let pipeline = StatementPipeline::new();

    for profile in profiles().iter().filter(|p| p.id != BankId::Generic) {
        for signature in profile.signatures {
            let result = pipeline.process(&[[*signature, "01/03/2024 GROCERIES 100.00"]]);
            assert_eq!(result.summary.bank, profile.id, "signature {signature:?}");
            assert_eq!(
                result
                    .diagnostics_of(DiagnosticKind::BankNotIdentified)
                    .count(),
                0
            );
        }
    }
}

#[test]
fn test_text_dump_matches_pages() {
    let pipeline = StatementPipeline::new();
    let pages = common::hdfc();
    let text = pages
        .iter()
        .map(|page| page.join("\n"))
        .collect::<Vec<_>>()
        .join("\x0c");

    assert_eq!(pipeline.extract_from_text(&text), pipeline.process(&pages));
}
