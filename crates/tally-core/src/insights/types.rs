//! Core types for the Insight Engine

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::month::MonthKey;

/// Heuristics the engine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Anomaly,
    Recurring,
    CategorySuggestion,
    Explanation,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Anomaly => "anomaly",
            InsightType::Recurring => "recurring",
            InsightType::CategorySuggestion => "category_suggestion",
            InsightType::Explanation => "explanation",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category spending well above its weekly average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub category: String,
    pub message: String,
    /// Spend in the trailing week
    pub current: f64,
    /// Weekly average over the baseline weeks before it
    pub baseline: f64,
    pub ratio: f64,
}

/// A payment that repeats at a steady amount and interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPayment {
    /// Trimmed, lowercased description shared by the payments
    pub merchant: String,
    pub avg_amount: f64,
    /// Average gap between payments, rounded to whole days
    pub frequency_days: i64,
    pub last_payment: NaiveDateTime,
    /// Category of the earliest payment in the group
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub transaction_id: i64,
    pub description: String,
    pub suggested_category: String,
}

/// A category that grew compared to the previous month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationCard {
    pub category: String,
    pub message: String,
    pub delta: f64,
    pub current: f64,
    pub previous: f64,
}

/// Output of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub month_key: MonthKey,
    pub anomalies: Vec<Anomaly>,
    pub recurring: Vec<RecurringPayment>,
    pub category_suggestions: Vec<CategorySuggestion>,
    pub explanations: Vec<ExplanationCard>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
            && self.recurring.is_empty()
            && self.category_suggestions.is_empty()
            && self.explanations.is_empty()
    }
}
