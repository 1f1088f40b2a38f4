//! Spend categorization.
//!
//! Rules are tried in priority order (highest first, ties by insertion
//! order); the first matching rule's category wins. Uncategorized
//! transactions simply have no category.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, StatementError};
use crate::models::config::CategoryConfig;

/// A compiled category rule.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub pattern: Regex,
    pub category: String,
    pub priority: i32,
}

impl CategoryRule {
    /// Compile a user pattern, matched case-insensitively.
    pub fn new(pattern: &str, category: impl Into<String>, priority: i32) -> Result<Self> {
        let compiled =
            Regex::new(&format!("(?i){pattern}")).map_err(|source| StatementError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: compiled,
            category: category.into(),
            priority,
        })
    }

    /// Rule matching any keyword at a word start.
    fn keywords(keywords: &[&str], category: &str, priority: i32) -> Self {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|kw| {
                kw.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect();

        Self {
            pattern: Regex::new(&format!(r"(?i)\b(?:{})", alternatives.join("|"))).unwrap(),
            category: category.to_string(),
            priority,
        }
    }
}

lazy_static! {
    static ref BUILTIN_RULES: Vec<CategoryRule> = vec![
        CategoryRule::keywords(
            &["PAYMENT RECEIVED", "THANK YOU", "REFUND", "REVERSAL", "CASHBACK"],
            "Payments & Refunds",
            200,
        ),
        CategoryRule::keywords(
            &[
                "AMAZON", "FLIPKART", "MYNTRA", "SHOP", "MALL", "STORE", "PAYTM", "DREAMPLUG",
                "CLOTH", "SILKS", "READYM", "COTTON", "GRASP", "RAMRAJ", "URVASI",
            ],
            "Shopping & E-commerce",
            100,
        ),
        CategoryRule::keywords(
            &["SWIGGY", "ZOMATO", "RESTAURANT", "CAFE", "FOOD", "KITCHEN", "FAMILY BAZAR"],
            "Food & Dining",
            100,
        ),
        CategoryRule::keywords(
            &[
                "UBER", "OLA", "IRCTC", "AIRLINE", "FLIGHT", "HOTEL", "RAILWAY", "MAKEMYTRIP",
                "BUS", "TOLL",
            ],
            "Travel & Transportation",
            100,
        ),
        CategoryRule::keywords(
            &[
                "PETROL", "DIESEL", "FUEL", "HP", "SHELL", "BPCL", "HPCL", "FILLING",
                "SERVICE STAT", "ENERGY STAT", "PETROLEUM", "AUTOMOBILES", "CHAKRA PETROL",
                "ESSAR", "GREEN GAS",
            ],
            "Fuel & Vehicle",
            100,
        ),
        CategoryRule::keywords(
            &[
                "ELECTRICITY", "WATER", "BROADBAND", "MOBILE", "RECHARGE", "GAS", "PHONEPE",
                "BILLDESK", "BILL PAYMENT", "ONE97", "MOBIKWIK",
            ],
            "Bills & Utilities",
            100,
        ),
        CategoryRule::keywords(
            &[
                "NETFLIX", "PRIME", "MOVIE", "HOTSTAR", "SPOTIFY", "YOUTUBE",
                "BIGTREE ENTERTAINMENT",
            ],
            "Entertainment",
            100,
        ),
        CategoryRule::keywords(
            &["INSURANCE", "SHRIRAM LIFE", "EMI", "LOAN"],
            "Insurance & Finance",
            100,
        ),
        CategoryRule::keywords(
            &["MEDICAL", "HOSPITAL", "PHARMACY", "CLINIC", "DOCTOR", "NURSING"],
            "Healthcare",
            100,
        ),
        CategoryRule::keywords(
            &["FEE", "CHARGE", "OVERLIMIT", "GST", "INTEREST", "SURCHARGE"],
            "Fees & Charges",
            100,
        ),
    ];
}

/// Ordered, first-match-wins category rules.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Categorizer with no rules; every description stays uncategorized.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in Indian merchant rule table.
    pub fn builtin() -> Self {
        Self::from_rules(BUILTIN_RULES.clone())
    }

    /// Built-ins (unless disabled) followed by configured rules.
    pub fn from_config(config: &CategoryConfig) -> Result<Self> {
        let mut rules = if config.use_builtin_rules {
            BUILTIN_RULES.clone()
        } else {
            Vec::new()
        };

        for rule in &config.extra_rules {
            rules.push(CategoryRule::new(&rule.pattern, rule.category.clone(), rule.priority)?);
        }

        Ok(Self::from_rules(rules))
    }

    fn from_rules(mut rules: Vec<CategoryRule>) -> Self {
        // Stable: equal priorities keep insertion order
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { rules }
    }

    /// Append a rule; it is placed after existing rules of equal priority.
    pub fn with_rule(mut self, rule: CategoryRule) -> Self {
        self.rules.push(rule);
        Self::from_rules(self.rules)
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Category of the first rule matching the normalized description.
    pub fn categorize(&self, description: &str) -> Option<&str> {
        let normalized = description.split_whitespace().collect::<Vec<_>>().join(" ");
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| rule.category.as_str())
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::builtin()
    }
}
