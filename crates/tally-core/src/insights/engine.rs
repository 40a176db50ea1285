//! Insight Engine - runs every heuristic over one record set

use chrono::NaiveDateTime;

use super::types::{InsightType, Insights};
use super::{detect_anomalies, detect_recurring, explain_increases, suggest_categories};
use crate::config::AnalyticsConfig;
use crate::models::Transaction;
use crate::month::MonthKey;

/// Runs the insight heuristics with one set of thresholds
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: AnalyticsConfig,
}

impl InsightEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Heuristics run by [`InsightEngine::analyze`], in output order
    pub fn insight_types(&self) -> Vec<InsightType> {
        vec![
            InsightType::Anomaly,
            InsightType::Recurring,
            InsightType::CategorySuggestion,
            InsightType::Explanation,
        ]
    }

    /// Run all heuristics.
    ///
    /// Anomalies and recurring payments look back from `now`; suggestions and
    /// explanations are scoped to `month`.
    pub fn analyze(
        &self,
        records: &[Transaction],
        month: MonthKey,
        now: NaiveDateTime,
    ) -> Insights {
        let anomalies = detect_anomalies(records, now, &self.config.anomaly);
        log_count(InsightType::Anomaly, anomalies.len());

        let recurring = detect_recurring(records, now, &self.config.recurring);
        log_count(InsightType::Recurring, recurring.len());

        let category_suggestions = suggest_categories(records, month, &self.config.suggestions);
        log_count(InsightType::CategorySuggestion, category_suggestions.len());

        let explanations = explain_increases(records, month, &self.config.explanations);
        log_count(InsightType::Explanation, explanations.len());

        Insights {
            month_key: month,
            anomalies,
            recurring,
            category_suggestions,
            explanations,
        }
    }
}

fn log_count(insight: InsightType, count: usize) {
    tracing::debug!(
        insight = insight.as_str(),
        count = count,
        "Insight analysis complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnomalyConfig;
    use crate::test_utils::*;

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::default();
        let types = engine.insight_types();
        assert_eq!(types.len(), 4);
        assert!(types.contains(&InsightType::Anomaly));
        assert!(types.contains(&InsightType::Explanation));
    }

    #[test]
    fn test_analyze_empty() {
        let engine = InsightEngine::default();
        let insights = engine.analyze(&[], month_key("2024-06"), at(2024, 6, 30));
        assert!(insights.is_empty());
        assert_eq!(insights.month_key.to_string(), "2024-06");
    }

    #[test]
    fn test_analyze_all_heuristics() {
        let records = vec![
            expense(1, 499.0, "Subscriptions", at(2024, 4, 10)).with_description("Netflix"),
            expense(2, 499.0, "Subscriptions", at(2024, 5, 10)).with_description("Netflix"),
            expense(3, 499.0, "Subscriptions", at(2024, 6, 9)).with_description("Netflix"),
            expense(4, 100.0, "Dining", at(2024, 6, 5)),
            expense(5, 900.0, "Dining", at(2024, 6, 27)).with_description("Zomato"),
        ];
        let engine = InsightEngine::default();
        let insights = engine.analyze(&records, month_key("2024-06"), at(2024, 6, 30));

        assert_eq!(insights.recurring.len(), 1);
        assert_eq!(insights.anomalies.len(), 1);
        assert_eq!(insights.anomalies[0].category, "Dining");

        let suggested: Vec<(i64, &str)> = insights
            .category_suggestions
            .iter()
            .map(|s| (s.transaction_id, s.suggested_category.as_str()))
            .collect();
        assert_eq!(suggested, vec![(5, "Food"), (3, "Subscriptions")]);

        let categories: Vec<&str> = insights
            .explanations
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Dining"]);
    }

    #[test]
    fn test_config_thresholds_apply() {
        let mut config = AnalyticsConfig::default();
        config.anomaly = AnomalyConfig {
            ratio_threshold: 50.0,
            ..AnomalyConfig::default()
        };
        let records = vec![
            expense(1, 100.0, "Dining", at(2024, 6, 5)),
            expense(2, 900.0, "Dining", at(2024, 6, 27)),
        ];
        let insights =
            InsightEngine::new(config).analyze(&records, month_key("2024-06"), at(2024, 6, 30));
        assert!(insights.anomalies.is_empty());
    }
}
