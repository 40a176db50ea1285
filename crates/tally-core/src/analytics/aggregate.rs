//! Aggregation engine: per-category and per-type sums within a month

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use super::types::{CategoryBreakdown, CategoryTotal, IncomeExpenseTotals};
use crate::models::{Transaction, TransactionType};
use crate::month::MonthKey;

/// Sum `tx_type` amounts per normalized category within `month`.
///
/// Sorted by total, largest first. Equal totals keep the order in which
/// their category first appeared in `records`.
pub fn aggregate_by_category(
    records: &[Transaction],
    month: MonthKey,
    tx_type: TransactionType,
) -> CategoryBreakdown {
    let range = month.range();
    let selected = records
        .iter()
        .filter(|t| t.tx_type == tx_type && range.contains(t.date));

    CategoryBreakdown {
        month_key: month,
        data: group_by_category(selected),
    }
}

/// `ts` moved back by `days`, saturating at the earliest representable time
pub(crate) fn days_before(ts: NaiveDateTime, days: i64) -> NaiveDateTime {
    Duration::try_days(days)
        .and_then(|d| ts.checked_sub_signed(d))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Sum expenses per category over an arbitrary `[start, end)` window
pub(crate) fn expense_totals_between(
    records: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<CategoryTotal> {
    group_by_category(
        records
            .iter()
            .filter(|t| t.is_expense() && t.date >= start && t.date < end),
    )
}

fn group_by_category<'a>(records: impl Iterator<Item = &'a Transaction>) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for tx in records {
        match index.get(tx.category_normalized.as_str()) {
            Some(&i) => totals[i].total += tx.amount,
            None => {
                index.insert(&tx.category_normalized, totals.len());
                totals.push(CategoryTotal {
                    category: tx.category.clone(),
                    category_normalized: tx.category_normalized.clone(),
                    total: tx.amount,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order for ties
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Income and expense sums within `month`; both are always present
pub fn income_expense_totals(records: &[Transaction], month: MonthKey) -> IncomeExpenseTotals {
    let range = month.range();
    let (income, expense) = records
        .iter()
        .filter(|t| range.contains(t.date))
        .fold((0.0, 0.0), |(income, expense), t| match t.tx_type {
            TransactionType::Income => (income + t.amount, expense),
            TransactionType::Expense => (income, expense + t.amount),
        });

    IncomeExpenseTotals {
        month_key: month,
        income,
        expense,
        net: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn sample() -> Vec<Transaction> {
        vec![
            expense(1, 120.0, "Groceries", at(2024, 3, 2)),
            expense(2, 30.0, "groceries ", at(2024, 3, 9)),
            expense(3, 50.0, "Transport", at(2024, 3, 10)),
            expense(4, 150.0, "Dining", at(2024, 3, 11)),
            income(5, 2000.0, "Salary", at(2024, 3, 1)),
            // Outside the month
            expense(6, 999.0, "Groceries", at(2024, 4, 1)),
            expense(7, 999.0, "Groceries", at(2024, 2, 29)),
        ]
    }

    #[test]
    fn test_groups_by_normalized_category() {
        let breakdown =
            aggregate_by_category(&sample(), month_key("2024-03"), TransactionType::Expense);

        assert_eq!(breakdown.month_key.to_string(), "2024-03");
        assert_eq!(breakdown.data.len(), 3);
        // Groceries (150) ties with Dining (150) and appeared first
        assert_eq!(breakdown.data[0].category, "Groceries");
        assert_eq!(breakdown.data[0].category_normalized, "groceries");
        assert_eq!(breakdown.data[0].total, 150.0);
        assert_eq!(breakdown.data[1].category, "Dining");
        assert_eq!(breakdown.data[2].category, "Transport");
        assert_eq!(breakdown.total(), 350.0);
    }

    #[test]
    fn test_tie_order_is_stable_across_calls() {
        let records = sample();
        let first = aggregate_by_category(&records, month_key("2024-03"), TransactionType::Expense);
        for _ in 0..10 {
            let again =
                aggregate_by_category(&records, month_key("2024-03"), TransactionType::Expense);
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_total_independent_of_record_order() {
        let mut records = sample();
        let forward = aggregate_by_category(&records, month_key("2024-03"), TransactionType::Expense);
        records.reverse();
        let reversed =
            aggregate_by_category(&records, month_key("2024-03"), TransactionType::Expense);
        assert_eq!(forward.total(), reversed.total());
    }

    #[test]
    fn test_income_aggregation() {
        let breakdown =
            aggregate_by_category(&sample(), month_key("2024-03"), TransactionType::Income);
        assert_eq!(breakdown.data.len(), 1);
        assert_eq!(breakdown.total_for("salary"), 2000.0);
        assert_eq!(breakdown.total_for("rent"), 0.0);
    }

    #[test]
    fn test_income_expense_totals() {
        let totals = income_expense_totals(&sample(), month_key("2024-03"));
        assert_eq!(totals.income, 2000.0);
        assert_eq!(totals.expense, 350.0);
        assert_eq!(totals.net, totals.income - totals.expense);
    }

    #[test]
    fn test_empty_month_has_zero_totals() {
        let totals = income_expense_totals(&[], month_key("2024-03"));
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.net, 0.0);

        let only_income = vec![income(1, 10.0, "Gift", at(2024, 3, 5))];
        let totals = income_expense_totals(&only_income, month_key("2024-03"));
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.net, 10.0);
    }
}
