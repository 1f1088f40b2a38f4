//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatementError};

/// Main configuration for the cardledger pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bank detection configuration.
    pub detection: DetectionConfig,

    /// Grammar configuration.
    pub grammar: GrammarConfig,

    /// Record validation configuration.
    pub validation: ValidationConfig,

    /// Categorization configuration.
    pub categories: CategoryConfig,
}

/// Bank detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Number of leading non-noise lines inspected for bank signatures.
    pub window_lines: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { window_lines: 30 }
    }
}

/// Grammar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Maximum continuation lines merged into one transaction description.
    pub max_continuation_lines: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_continuation_lines: 3,
        }
    }
}

/// Record validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Days before the statement period start still accepted at high confidence.
    pub days_before_period: i64,

    /// Maximum fractional digits in an amount.
    pub max_fraction_digits: u32,

    /// Mark every record low-confidence when the text came from OCR.
    pub ocr_lowers_confidence: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            days_before_period: 45,
            max_fraction_digits: 2,
            ocr_lowers_confidence: true,
        }
    }
}

/// Categorization configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Start from the built-in rule table.
    pub use_builtin_rules: bool,

    /// Additional rules, appended after the built-ins.
    pub extra_rules: Vec<CategoryRuleConfig>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            use_builtin_rules: true,
            extra_rules: Vec::new(),
        }
    }
}

/// A user-defined category rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRuleConfig {
    /// Regular expression matched case-insensitively against the description.
    pub pattern: String,

    /// Category assigned on match.
    pub category: String,

    /// Higher priorities are tried first.
    #[serde(default)]
    pub priority: i32,
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no pipeline can run with.
    pub fn check(&self) -> Result<()> {
        if self.detection.window_lines == 0 {
            return Err(StatementError::Config(
                "detection.window_lines must be at least 1".to_string(),
            ));
        }
        if self.validation.days_before_period < 0 {
            return Err(StatementError::Config(
                "validation.days_before_period must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "validation": { "days_before_period": 60 } }"#).unwrap();

        assert_eq!(config.validation.days_before_period, 60);
        assert_eq!(config.validation.max_fraction_digits, 2);
        assert_eq!(config.detection, DetectionConfig::default());
        assert!(config.categories.use_builtin_rules);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EngineConfig::default();
        config.categories.extra_rules.push(CategoryRuleConfig {
            pattern: "GYM".to_string(),
            category: "Fitness".to_string(),
            priority: 10,
        });
        config.save(&path).unwrap();

        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = EngineConfig::default();
        config.detection.window_lines = 0;
        assert!(matches!(config.check(), Err(StatementError::Config(_))));
    }
}
