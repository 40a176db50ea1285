//! Monthly report: budget outcomes and month-over-month comparison

use std::collections::HashMap;

use super::aggregate::{aggregate_by_category, income_expense_totals};
use super::types::{
    BudgetComparison, CategoryTotal, CutDown, MonthOverMonthSaving, MonthlyReport,
};
use crate::config::ReportConfig;
use crate::models::{Budget, Transaction, TransactionType};
use crate::month::MonthKey;

/// Build the report for `month` against the month before it.
///
/// A budget is overspent only when spend is strictly above its limit; spending
/// exactly the limit counts as saved.
pub fn monthly_report(
    records: &[Transaction],
    budgets: &[Budget],
    month: MonthKey,
    config: &ReportConfig,
) -> MonthlyReport {
    let current = aggregate_by_category(records, month, TransactionType::Expense);
    let previous = aggregate_by_category(records, month.previous(), TransactionType::Expense);
    let totals = income_expense_totals(records, month);

    let mut month_budgets: Vec<&Budget> =
        budgets.iter().filter(|b| b.month_key == month).collect();
    month_budgets.sort_by(|a, b| a.category.cmp(&b.category));

    let mut overspent = Vec::new();
    let mut saved = Vec::new();
    for budget in month_budgets {
        let comparison = BudgetComparison {
            category: budget.category.clone(),
            budget: budget.amount,
            spent: current.total_for(&budget.category_normalized),
        };
        if comparison.spent > comparison.budget {
            overspent.push(comparison);
        } else {
            saved.push(comparison);
        }
    }

    let cut_down = largest_cut_down(&current.data, &previous.data);
    let month_over_month_savings =
        month_over_month_savings(&current.data, &previous.data, config.savings_top_n);
    let total_spent = current.total();

    MonthlyReport {
        month_key: month,
        totals_per_category: current.data,
        previous_totals_per_category: previous.data,
        overspent,
        saved,
        cut_down,
        total_spent,
        totals,
        month_over_month_savings,
    }
}

fn totals_by_key(totals: &[CategoryTotal]) -> HashMap<&str, &CategoryTotal> {
    totals
        .iter()
        .map(|t| (t.category_normalized.as_str(), t))
        .collect()
}

/// Category with the largest positive `previous - current` across both months.
///
/// Current-month categories are considered first; a later candidate replaces
/// the best only when strictly larger.
fn largest_cut_down(current: &[CategoryTotal], previous: &[CategoryTotal]) -> Option<CutDown> {
    let current_by_key = totals_by_key(current);
    let previous_by_key = totals_by_key(previous);

    let candidates = current.iter().chain(
        previous
            .iter()
            .filter(|p| !current_by_key.contains_key(p.category_normalized.as_str())),
    );

    let mut best: Option<CutDown> = None;
    for entry in candidates {
        let key = entry.category_normalized.as_str();
        let current_spent = current_by_key.get(key).map(|t| t.total).unwrap_or(0.0);
        let previous_spent = previous_by_key.get(key).map(|t| t.total).unwrap_or(0.0);
        let difference = previous_spent - current_spent;
        if difference <= 0.0 {
            continue;
        }
        if best.as_ref().is_some_and(|b| difference <= b.difference) {
            continue;
        }
        // Prefer the label the user used this month
        let category = current_by_key
            .get(key)
            .or_else(|| previous_by_key.get(key))
            .map(|t| t.category.clone())
            .unwrap_or_default();
        best = Some(CutDown {
            category,
            previous_spent,
            current_spent,
            difference,
        });
    }
    best
}

/// Reductions among categories that have spend this month, largest first
fn month_over_month_savings(
    current: &[CategoryTotal],
    previous: &[CategoryTotal],
    top_n: usize,
) -> Vec<MonthOverMonthSaving> {
    let previous_by_key = totals_by_key(previous);

    let mut savings: Vec<MonthOverMonthSaving> = current
        .iter()
        .map(|entry| {
            let previous_spent = previous_by_key
                .get(entry.category_normalized.as_str())
                .map(|t| t.total)
                .unwrap_or(0.0);
            MonthOverMonthSaving {
                category: entry.category.clone(),
                previous_spent,
                current_spent: entry.total,
                saved_amount: previous_spent - entry.total,
            }
        })
        .filter(|s| s.saved_amount > 0.0)
        .collect();

    savings.sort_by(|a, b| b.saved_amount.total_cmp(&a.saved_amount));
    savings.truncate(top_n);
    savings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn report(records: &[Transaction], budgets: &[Budget], month: &str) -> MonthlyReport {
        monthly_report(records, budgets, month_key(month), &ReportConfig::default())
    }

    #[test]
    fn test_overspent_and_saved() {
        let records = vec![
            expense(1, 1200.0, "Rent", at(2024, 5, 1)),
            expense(2, 800.0, "Groceries", at(2024, 5, 10)),
            income(3, 5000.0, "Salary", at(2024, 5, 1)),
        ];
        let budgets = vec![
            budget(1, "Rent", 1000.0, "2024-05"),
            budget(2, "Groceries", 1000.0, "2024-05"),
        ];

        let report = report(&records, &budgets, "2024-05");

        assert_eq!(report.overspent.len(), 1);
        let over = &report.overspent[0];
        assert_eq!(over.category, "Rent");
        assert_eq!(over.spent - over.budget, 200.0);

        assert_eq!(report.saved.len(), 1);
        assert_eq!(report.saved[0].category, "Groceries");
        assert_eq!(report.saved[0].spent, 800.0);

        assert_eq!(report.total_spent, 2000.0);
        assert_eq!(report.totals.income, 5000.0);
        assert_eq!(report.totals.net, 3000.0);
    }

    #[test]
    fn test_spending_exactly_the_limit_is_saved() {
        let records = vec![expense(1, 300.0, "Fun", at(2024, 5, 4))];
        let budgets = vec![budget(1, "Fun", 300.0, "2024-05")];
        let report = report(&records, &budgets, "2024-05");
        assert!(report.overspent.is_empty());
        assert_eq!(report.saved[0].spent, 300.0);
    }

    #[test]
    fn test_cut_down_picks_largest_reduction() {
        let records = vec![
            expense(1, 500.0, "Dining", at(2024, 4, 5)),
            expense(2, 200.0, "Dining", at(2024, 5, 5)),
            expense(3, 400.0, "Travel", at(2024, 4, 20)),
            expense(4, 100.0, "Groceries", at(2024, 4, 2)),
            expense(5, 150.0, "Groceries", at(2024, 5, 2)),
        ];
        let report = report(&records, &[], "2024-05");
        let cut = report.cut_down.unwrap();
        // Travel dropped 400 to nothing, Dining only 300
        assert_eq!(cut.category, "Travel");
        assert_eq!(cut.previous_spent, 400.0);
        assert_eq!(cut.current_spent, 0.0);
        assert_eq!(cut.difference, 400.0);
    }

    #[test]
    fn test_cut_down_tie_keeps_current_month_category() {
        let records = vec![
            expense(1, 300.0, "Dining", at(2024, 4, 5)),
            expense(2, 100.0, "dining", at(2024, 5, 5)),
            expense(3, 200.0, "Travel", at(2024, 4, 20)),
        ];
        let report = report(&records, &[], "2024-05");
        let cut = report.cut_down.unwrap();
        assert_eq!(cut.category, "dining");
        assert_eq!(cut.difference, 200.0);
    }

    #[test]
    fn test_savings_only_cover_current_categories() {
        let records = vec![
            expense(1, 500.0, "Dining", at(2024, 4, 5)),
            expense(2, 200.0, "Dining", at(2024, 5, 5)),
            expense(3, 400.0, "Travel", at(2024, 4, 20)),
            expense(4, 50.0, "Books", at(2024, 4, 20)),
            expense(5, 20.0, "Books", at(2024, 5, 20)),
            expense(6, 90.0, "Fuel", at(2024, 5, 20)),
        ];
        let report = report(&records, &[], "2024-05");
        let savings: Vec<(&str, f64)> = report
            .month_over_month_savings
            .iter()
            .map(|s| (s.category.as_str(), s.saved_amount))
            .collect();
        assert_eq!(savings, vec![("Dining", 300.0), ("Books", 30.0)]);
    }

    #[test]
    fn test_savings_capped_at_top_n() {
        let mut records = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            let id = i as i64 * 2;
            records.push(expense(id, 100.0 + i as f64 * 10.0, name, at(2024, 1, 10)));
            records.push(expense(id + 1, 10.0, name, at(2024, 2, 10)));
        }
        let report = report(&records, &[], "2024-02");
        assert_eq!(report.month_over_month_savings.len(), 5);
        assert_eq!(report.month_over_month_savings[0].category, "G");
        // previous month of February is January across the same year
        assert_eq!(report.previous_totals_per_category.len(), 7);
    }

    #[test]
    fn test_january_compares_against_december() {
        let records = vec![
            expense(1, 900.0, "Gifts", at(2023, 12, 20)),
            expense(2, 100.0, "Gifts", at(2024, 1, 3)),
        ];
        let report = report(&records, &[], "2024-01");
        assert_eq!(report.cut_down.unwrap().difference, 800.0);
    }

    #[test]
    fn test_empty_month_degrades_to_zeroes() {
        let report = report(&[], &[], "2024-05");
        assert!(report.totals_per_category.is_empty());
        assert!(report.overspent.is_empty());
        assert!(report.saved.is_empty());
        assert!(report.cut_down.is_none());
        assert_eq!(report.total_spent, 0.0);
        assert_eq!(report.totals.net, 0.0);
    }
}
