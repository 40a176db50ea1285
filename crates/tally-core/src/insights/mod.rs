//! Insight Engine - heuristics over recent spending
//!
//! Four independent heuristics, each a pure function of the records and an
//! explicit "now" or target month:
//!
//! - **Anomalies** - Categories spending well above their weekly average
//! - **Recurring** - Payments repeating at a steady amount and interval
//! - **Category suggestions** - Keyword matches on descriptions
//! - **Explanations** - Categories behind a month-over-month increase
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::{AnalyticsConfig, InsightEngine};
//!
//! let engine = InsightEngine::new(AnalyticsConfig::default());
//! let insights = engine.analyze(&snapshot.transactions, snapshot.month, now);
//! ```

pub mod anomaly;
pub mod engine;
pub mod explain;
pub mod recurring;
pub mod suggest;
pub mod types;

pub use anomaly::detect_anomalies;
pub use engine::InsightEngine;
pub use explain::explain_increases;
pub use recurring::detect_recurring;
pub use suggest::suggest_categories;
pub use types::{
    Anomaly, CategorySuggestion, ExplanationCard, InsightType, Insights, RecurringPayment,
};
