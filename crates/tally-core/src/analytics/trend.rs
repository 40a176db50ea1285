//! Multi-month income/expense series

use chrono::NaiveDateTime;

use super::aggregate::income_expense_totals;
use super::types::TrendPoint;
use crate::models::Transaction;
use crate::month::MonthKey;

/// Income and expense for the `months_back` months ending with the month of
/// `now`, oldest first. Months without records are reported as zeros.
pub fn trend_series(
    records: &[Transaction],
    now: NaiveDateTime,
    months_back: usize,
) -> Vec<TrendPoint> {
    MonthKey::current(now)
        .trailing(months_back)
        .into_iter()
        .map(|month| {
            let totals = income_expense_totals(records, month);
            TrendPoint {
                month_key: month,
                income: totals.income,
                expense: totals.expense,
                net: totals.net,
            }
        })
        .collect()
}
