//! Budget command implementations

use anyhow::Result;
use chrono::NaiveDateTime;
use tally_core::analytics::BudgetStatus;
use tally_core::{
    budgets_with_progress, AnalyticsConfig, Database, NewBudget, Snapshot, TransactionFilter,
};

use super::{print_json, resolve_month, truncate};

pub fn cmd_budget_set(
    db: &Database,
    category: &str,
    amount: f64,
    month: Option<&str>,
    now: NaiveDateTime,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let budget = db.upsert_budget(NewBudget::new(category, amount, month))?;
    println!(
        "✅ Budget for {} in {} set to {:.2} (#{})",
        budget.category, budget.month_key, budget.amount, budget.id
    );
    Ok(())
}

pub fn cmd_budget_list(
    db: &Database,
    config: &AnalyticsConfig,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let snapshot =
        Snapshot::load_filtered(db, &TransactionFilter::new().in_month(month), month, now)?;
    let report = budgets_with_progress(
        &snapshot.transactions,
        &snapshot.budgets,
        month,
        &config.budget,
    );

    if json {
        return print_json(&report);
    }

    println!();
    println!("💰 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.budgets.is_empty() {
        println!("   No budgets set. Add one with:");
        println!("     tally budget set --category Food --amount 400");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:20} │ {:>10} │ {:>10} │ {:>6} │ Status",
        "ID", "Category", "Limit", "Spent", "%"
    );
    println!("   ─────┼──────────────────────┼────────────┼────────────┼────────┼──────────────");
    for row in &report.budgets {
        let icon = match row.status {
            BudgetStatus::Under => "🟢",
            BudgetStatus::Near => "🟡",
            BudgetStatus::Exceeded => "🔴",
        };
        println!(
            "   {:>4} │ {:20} │ {:>10.2} │ {:>10.2} │ {:>5.1}% │ {} {}",
            row.budget.id,
            truncate(&row.budget.category, 20),
            row.budget.amount,
            row.spent,
            row.percentage,
            icon,
            row.status.label()
        );
    }

    Ok(())
}

pub fn cmd_budget_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_budget(id)?;
    println!("🗑️  Deleted budget #{}", id);
    Ok(())
}
