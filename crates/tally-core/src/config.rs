//! Analytics policy configuration
//!
//! The heuristic thresholds (budget bands, anomaly ratio, recurring-payment
//! tolerances, keyword table) are policy, not derived values. They live here
//! as named fields and can be overridden from TOML.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path passed by the caller, if it exists
//! 2. Override in data dir (~/.local/share/tally/config/analytics.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Longest accepted lookback for any rolling window
const MAX_WINDOW_DAYS: i64 = 3650;

/// Most baseline windows the anomaly detector may average over
const MAX_BASELINE_WEEKS: i64 = 520;

/// Percentage bands for budget status
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetBands {
    pub near_percent: f64,
    pub exceeded_percent: f64,
}

impl Default for BudgetBands {
    fn default() -> Self {
        Self {
            near_percent: 80.0,
            exceeded_percent: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub savings_top_n: usize,
    pub trend_months: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            savings_top_n: 5,
            trend_months: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyConfig {
    /// Minimum current/baseline ratio to flag
    pub ratio_threshold: f64,
    /// Length of the trailing window in days
    pub window_days: i64,
    /// Number of windows before the trailing one that form the baseline
    pub baseline_weeks: i64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: 1.8,
            window_days: 7,
            baseline_weeks: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringConfig {
    pub window_days: i64,
    pub min_occurrences: usize,
    /// Allowed amount spread as a fraction of the average amount
    pub amount_tolerance: f64,
    /// Allowed deviation of each gap from the average gap, in days
    pub interval_tolerance_days: f64,
    pub max_results: usize,
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self {
            window_days: 90,
            min_occurrences: 3,
            amount_tolerance: 0.2,
            interval_tolerance_days: 5.0,
            max_results: 5,
        }
    }
}

/// One row of the keyword table: a category and the description
/// substrings that suggest it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True when any keyword occurs in the (already lowercased) text
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && lowercase_text.contains(keyword.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionConfig {
    /// How many of the month's most recent transactions are scanned
    pub scan_limit: usize,
    pub max_suggestions: usize,
    pub rules: Vec<KeywordRule>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            scan_limit: 50,
            max_suggestions: 10,
            rules: default_keyword_rules(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationConfig {
    pub top_n: usize,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self { top_n: 4 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// Normalized category treated as rent
    pub rent_category: String,
    pub rent_max_share_of_income: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            rent_category: "rent".to_string(),
            rent_max_share_of_income: 0.5,
        }
    }
}

/// All policy constants used by the analytics and insight engines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsConfig {
    pub budget: BudgetBands,
    pub report: ReportConfig,
    pub anomaly: AnomalyConfig,
    pub recurring: RecurringConfig,
    pub suggestions: SuggestionConfig,
    pub explanations: ExplanationConfig,
    pub alerts: AlertConfig,
}

impl AnalyticsConfig {
    /// Load the override file if present, otherwise the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let candidate = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .filter(|p| p.exists());

        match candidate {
            Some(path) => {
                debug!(path = %path.display(), "Loading analytics config");
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config(&content)
            }
            None => parse_config(DEFAULT_CONFIG),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analytics.toml"))
}

fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "Food",
            &["swiggy", "zomato", "ubereats", "restaurant", "dine", "cafe"],
        ),
        KeywordRule::new(
            "Transport",
            &["uber", "ola", "rapido", "metro", "fuel", "petrol", "diesel"],
        ),
        KeywordRule::new("Rent", &["rent", "landlord", "lease"]),
        KeywordRule::new(
            "Subscriptions",
            &["netflix", "spotify", "prime", "youtube", "hotstar"],
        ),
        KeywordRule::new(
            "Shopping",
            &["amazon", "flipkart", "myntra", "mall", "store"],
        ),
        KeywordRule::new(
            "Utilities",
            &["electricity", "water", "gas", "wifi", "internet", "broadband"],
        ),
    ]
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    report: Option<RawReport>,
    anomaly: Option<RawAnomaly>,
    recurring: Option<RawRecurring>,
    suggestions: Option<RawSuggestions>,
    explanations: Option<RawExplanations>,
    alerts: Option<RawAlerts>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    near_percent: Option<f64>,
    exceeded_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    savings_top_n: Option<usize>,
    trend_months: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawAnomaly {
    ratio_threshold: Option<f64>,
    window_days: Option<i64>,
    baseline_weeks: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawRecurring {
    window_days: Option<i64>,
    min_occurrences: Option<usize>,
    amount_tolerance: Option<f64>,
    interval_tolerance_days: Option<f64>,
    max_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    scan_limit: Option<usize>,
    max_suggestions: Option<usize>,
    rules: Option<Vec<KeywordRule>>,
}

#[derive(Debug, Deserialize)]
struct RawExplanations {
    top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    rent_category: Option<String>,
    rent_max_share_of_income: Option<f64>,
}

/// Parse config from TOML content, keeping defaults for missing keys
pub fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(budget) = raw.budget {
        if let Some(v) = budget.near_percent {
            config.budget.near_percent = v;
        }
        if let Some(v) = budget.exceeded_percent {
            config.budget.exceeded_percent = v;
        }
    }

    if let Some(report) = raw.report {
        if let Some(v) = report.savings_top_n {
            config.report.savings_top_n = v;
        }
        if let Some(v) = report.trend_months {
            config.report.trend_months = v;
        }
    }

    if let Some(anomaly) = raw.anomaly {
        if let Some(v) = anomaly.ratio_threshold {
            config.anomaly.ratio_threshold = v;
        }
        if let Some(v) = anomaly.window_days {
            config.anomaly.window_days = v;
        }
        if let Some(v) = anomaly.baseline_weeks {
            config.anomaly.baseline_weeks = v;
        }
    }

    if let Some(recurring) = raw.recurring {
        if let Some(v) = recurring.window_days {
            config.recurring.window_days = v;
        }
        if let Some(v) = recurring.min_occurrences {
            config.recurring.min_occurrences = v;
        }
        if let Some(v) = recurring.amount_tolerance {
            config.recurring.amount_tolerance = v;
        }
        if let Some(v) = recurring.interval_tolerance_days {
            config.recurring.interval_tolerance_days = v;
        }
        if let Some(v) = recurring.max_results {
            config.recurring.max_results = v;
        }
    }

    if let Some(suggestions) = raw.suggestions {
        if let Some(v) = suggestions.scan_limit {
            config.suggestions.scan_limit = v;
        }
        if let Some(v) = suggestions.max_suggestions {
            config.suggestions.max_suggestions = v;
        }
        if let Some(rules) = suggestions.rules {
            // Keywords are matched against lowercased descriptions
            config.suggestions.rules = rules
                .into_iter()
                .map(|rule| KeywordRule {
                    category: rule.category,
                    keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect();
        }
    }

    if let Some(explanations) = raw.explanations {
        if let Some(v) = explanations.top_n {
            config.explanations.top_n = v;
        }
    }

    if let Some(alerts) = raw.alerts {
        if let Some(v) = alerts.rent_category {
            config.alerts.rent_category = crate::category::normalize_category(Some(&v));
        }
        if let Some(v) = alerts.rent_max_share_of_income {
            config.alerts.rent_max_share_of_income = v;
        }
    }

    if config.budget.near_percent > config.budget.exceeded_percent {
        return Err(Error::Config(
            "budget.near_percent must not exceed budget.exceeded_percent".to_string(),
        ));
    }
    check_range("anomaly.window_days", config.anomaly.window_days, MAX_WINDOW_DAYS)?;
    check_range(
        "anomaly.baseline_weeks",
        config.anomaly.baseline_weeks,
        MAX_BASELINE_WEEKS,
    )?;
    check_range(
        "recurring.window_days",
        config.recurring.window_days,
        MAX_WINDOW_DAYS,
    )?;

    Ok(config)
}

fn check_range(key: &str, value: i64, max: i64) -> Result<()> {
    if !(1..=max).contains(&value) {
        return Err(Error::Config(format!(
            "{} must be between 1 and {}, got {}",
            key, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [anomaly]
            ratio_threshold = 2.5

            [recurring]
            max_results = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.anomaly.ratio_threshold, 2.5);
        assert_eq!(config.anomaly.window_days, 7);
        assert_eq!(config.recurring.max_results, 2);
        assert_eq!(config.recurring.amount_tolerance, 0.2);
        assert_eq!(config.budget, BudgetBands::default());
        assert_eq!(config.suggestions.rules.len(), 6);
    }

    #[test]
    fn test_rules_override_replaces_table() {
        let config = parse_config(
            r#"
            [[suggestions.rules]]
            category = "Pets"
            keywords = ["Petco", "vet"]
            "#,
        )
        .unwrap();

        assert_eq!(config.suggestions.rules.len(), 1);
        assert_eq!(config.suggestions.rules[0].category, "Pets");
        assert!(config.suggestions.rules[0].matches("petco #42"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            parse_config("[budget\nnear_percent = "),
            Err(Error::Config(_))
        ));
        assert!(parse_config("[budget]\nnear_percent = 120.0").is_err());
        assert!(parse_config("[anomaly]\nwindow_days = 0").is_err());
    }

    #[test]
    fn test_window_settings_are_bounded() {
        for content in [
            "[recurring]\nwindow_days = 9000000000000000",
            "[recurring]\nwindow_days = 0",
            "[anomaly]\nbaseline_weeks = 9000000000",
            "[anomaly]\nwindow_days = 3651",
        ] {
            assert!(
                matches!(parse_config(content), Err(Error::Config(_))),
                "{content} should be rejected"
            );
        }

        let config = parse_config("[anomaly]\nwindow_days = 3650\nbaseline_weeks = 520").unwrap();
        assert_eq!(config.anomaly.baseline_weeks, 520);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.toml");
        fs::write(&path, "[explanations]\ntop_n = 2\n").unwrap();

        let config = AnalyticsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.explanations.top_n, 2);
    }

    #[test]
    fn test_keyword_rule_matching() {
        let rule = KeywordRule::new("Food", &["Swiggy", "cafe"]);
        assert!(rule.matches("swiggy order 123"));
        assert!(rule.matches("blue tokai cafe"));
        assert!(!rule.matches("electricity bill"));
    }
}
