//! Spending alerts over a record set

use serde::{Deserialize, Serialize};

use crate::config::AlertConfig;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Rent takes more than the allowed share of income
    RentShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Evaluate every alert rule against `records`.
///
/// Callers choose the scope; the CLI passes one month of transactions.
pub fn build_alerts(records: &[Transaction], config: &AlertConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let income: f64 = records
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let rent: f64 = records
        .iter()
        .filter(|t| t.is_expense() && t.category_normalized == config.rent_category)
        .map(|t| t.amount)
        .sum();

    if income > 0.0 && rent > config.rent_max_share_of_income * income {
        alerts.push(Alert {
            kind: AlertKind::RentShare,
            message: format!(
                "⚠️ Rent is more than {}% of your income.",
                (config.rent_max_share_of_income * 100.0).round()
            ),
        });
    }

    alerts
}
