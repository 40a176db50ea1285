//! Derived report shapes
//!
//! None of these are persisted; each is the return value of a computation
//! over the current records.

use serde::{Deserialize, Serialize};

use crate::models::Budget;
use crate::month::MonthKey;

/// Summed amount for one normalized category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Label as first entered by the user
    pub category: String,
    pub category_normalized: String,
    pub total: f64,
}

/// Per-category totals for one month and transaction type, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub month_key: MonthKey,
    pub data: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn total(&self) -> f64 {
        self.data.iter().map(|c| c.total).sum()
    }

    /// Total for a normalized category, 0 when absent
    pub fn total_for(&self, category_normalized: &str) -> f64 {
        self.get(category_normalized).map(|c| c.total).unwrap_or(0.0)
    }

    pub fn get(&self, category_normalized: &str) -> Option<&CategoryTotal> {
        self.data
            .iter()
            .find(|c| c.category_normalized == category_normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseTotals {
    pub month_key: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Near,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Near => "near",
            Self::Exceeded => "exceeded",
        }
    }

    /// Human label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under => "Under control",
            Self::Near => "Near limit",
            Self::Exceeded => "Exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithProgress {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent: f64,
    /// Percent of the limit spent, one decimal place
    pub percentage: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgressReport {
    pub month_key: MonthKey,
    pub budgets: Vec<BudgetWithProgress>,
}

/// A budgeted category with its limit and actual spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
}

/// Category with the largest month-over-month reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutDown {
    pub category: String,
    pub previous_spent: f64,
    pub current_spent: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverMonthSaving {
    pub category: String,
    pub previous_spent: f64,
    pub current_spent: f64,
    pub saved_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month_key: MonthKey,
    pub totals_per_category: Vec<CategoryTotal>,
    pub previous_totals_per_category: Vec<CategoryTotal>,
    pub overspent: Vec<BudgetComparison>,
    pub saved: Vec<BudgetComparison>,
    pub cut_down: Option<CutDown>,
    pub total_spent: f64,
    pub totals: IncomeExpenseTotals,
    pub month_over_month_savings: Vec<MonthOverMonthSaving>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month_key: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowDay {
    /// Day of month, 1-based
    pub day: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowCalendar {
    pub month_key: MonthKey,
    pub days: Vec<CashflowDay>,
}
