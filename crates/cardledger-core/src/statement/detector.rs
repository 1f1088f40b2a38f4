//! Bank detection from early document lines.

use tracing::debug;

use crate::models::profile::{profiles, BankId};
use crate::models::statement::{Diagnostic, DiagnosticKind, LineRole, RawLine};

/// Outcome of bank detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Selected bank.
    pub bank: BankId,
    /// Signature hits per non-generic bank, in declaration order.
    pub scores: Vec<(BankId, usize)>,
    /// Set when detection fell back to the generic grammar.
    pub diagnostic: Option<Diagnostic>,
}

/// Scores bank profiles against the first lines of a document.
#[derive(Debug, Clone)]
pub struct BankDetector {
    window_lines: usize,
}

impl BankDetector {
    pub fn new(window_lines: usize) -> Self {
        Self { window_lines }
    }

    /// Select the bank whose signatures match most often.
    ///
    /// Ties go to the bank declared first. With no hits at all the generic
    /// grammar is selected and a warning is returned with it.
    pub fn detect(&self, lines: &[RawLine]) -> Detection {
        let window: Vec<&str> = lines
            .iter()
            .filter(|l| l.role != LineRole::Noise)
            .take(self.window_lines)
            .map(|l| l.text.as_str())
            .collect();
        let text = window.join("\n");

        let scores: Vec<(BankId, usize)> = profiles()
            .iter()
            .filter(|p| p.id != BankId::Generic)
            .map(|p| (p.id, p.signature_hits(&text)))
            .collect();

        let mut best: Option<(BankId, usize)> = None;
        for &(bank, hits) in &scores {
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((bank, hits));
            }
        }

        debug!(?scores, window = window.len(), "bank detection scores");

        match best {
            Some((bank, _)) => Detection {
                bank,
                scores,
                diagnostic: None,
            },
            None => Detection {
                bank: BankId::Generic,
                scores,
                diagnostic: Some(Diagnostic::warn(
                    DiagnosticKind::BankNotIdentified,
                    "bank not identified, using generic parser",
                )),
            },
        }
    }
}

impl Default for BankDetector {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::classifier::LineClassifier;

    fn detect(lines: &[&str]) -> Detection {
        let classified = LineClassifier::new().classify(&[lines]);
        BankDetector::default().detect(&classified)
    }

    #[test]
    fn test_detects_single_signature() {
        let detection = detect(&["ICICI Bank Credit Card", "01/03/2024 X 1.00"]);
        assert_eq!(detection.bank, BankId::Icici);
        assert!(detection.diagnostic.is_none());
    }

    #[test]
    fn test_more_hits_win() {
        let detection = detect(&[
            "Payments via HDFC Bank NEFT accepted",
            "Axis Bank Credit Card Statement",
            "www.axisbank.com | Flipkart Axis Bank",
        ]);
        assert_eq!(detection.bank, BankId::Axis);
    }

    #[test]
    fn test_tie_goes_to_declaration_order() {
        let detection = detect(&["HDFC Bank", "ICICI Bank"]);
        assert_eq!(detection.bank, BankId::Hdfc);
    }

    #[test]
    fn test_no_signature_falls_back_to_generic() {
        let detection = detect(&["ACME CARD SERVICES", "01/03/2024 COFFEE 90.00"]);
        assert_eq!(detection.bank, BankId::Generic);
        let diagnostic = detection.diagnostic.unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::BankNotIdentified);
        assert_eq!(diagnostic.message, "bank not identified, using generic parser");
    }

    #[test]
    fn test_window_limits_lines() {
        let classified = LineClassifier::new().classify(&[["ACME", "HDFC Bank"]]);
        assert_eq!(BankDetector::new(1).detect(&classified).bank, BankId::Generic);
        assert_eq!(BankDetector::new(2).detect(&classified).bank, BankId::Hdfc);
    }
}
