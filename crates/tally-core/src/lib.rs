//! Tally Core Library
//!
//! Derives reports from personal income/expense transactions and monthly
//! category budgets:
//! - Month-key calendar and category normalization
//! - Per-category aggregation and income/expense totals
//! - Budget progress, monthly report, trend series and cashflow calendar
//! - Insight heuristics (anomalies, recurring payments, category suggestions,
//!   month-over-month explanations) and alerts
//! - Record stores: in-memory and SQLite
//!
//! Every analytics function is a pure computation over an already-fetched
//! slice of records. "Now" is always passed in explicitly.

pub mod alerts;
pub mod analytics;
pub mod category;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod month;
pub mod store;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alerts::{build_alerts, Alert, AlertKind};
pub use analytics::{
    aggregate_by_category, budgets_with_progress, cashflow_calendar, income_expense_totals,
    monthly_page, monthly_report, trend_series, MonthlyPage,
};
pub use category::normalize_category;
pub use config::{AnalyticsConfig, KeywordRule};
pub use db::Database;
pub use error::{Error, Result};
pub use import::{parse_csv, ImportSummary};
pub use insights::{InsightEngine, Insights};
pub use models::{Budget, NewBudget, NewTransaction, Transaction, TransactionType};
pub use month::{month_key, month_range, previous_month_key, MonthKey, MonthRange};
pub use store::{MemoryStore, RecordStore, Snapshot, TransactionFilter};
