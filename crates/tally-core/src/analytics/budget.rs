//! Budget progress: joins a month's budgets with its expense totals

use super::aggregate::aggregate_by_category;
use super::types::{BudgetProgressReport, BudgetStatus, BudgetWithProgress};
use crate::config::BudgetBands;
use crate::models::{Budget, Transaction, TransactionType};
use crate::month::MonthKey;

/// Spend, percentage and status for every budget of `month`.
///
/// Ordered by raw category label (case-sensitive). A zero limit reports 0%.
pub fn budgets_with_progress(
    records: &[Transaction],
    budgets: &[Budget],
    month: MonthKey,
    bands: &BudgetBands,
) -> BudgetProgressReport {
    let expenses = aggregate_by_category(records, month, TransactionType::Expense);

    let mut selected: Vec<&Budget> = budgets.iter().filter(|b| b.month_key == month).collect();
    selected.sort_by(|a, b| a.category.cmp(&b.category));

    let budgets = selected
        .into_iter()
        .map(|budget| {
            let spent = expenses.total_for(&budget.category_normalized);
            let percentage = percentage_of(spent, budget.amount);
            BudgetWithProgress {
                budget: budget.clone(),
                spent,
                percentage,
                status: status_for(percentage, bands),
            }
        })
        .collect();

    BudgetProgressReport {
        month_key: month,
        budgets,
    }
}

/// `spent / limit * 100` rounded to one decimal; 0 for a zero limit
pub fn percentage_of(spent: f64, limit: f64) -> f64 {
    if limit == 0.0 {
        return 0.0;
    }
    round_to_tenth(spent / limit * 100.0)
}

pub fn status_for(percentage: f64, bands: &BudgetBands) -> BudgetStatus {
    if percentage >= bands.exceeded_percent {
        BudgetStatus::Exceeded
    } else if percentage >= bands.near_percent {
        BudgetStatus::Near
    } else {
        BudgetStatus::Under
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
