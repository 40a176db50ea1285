//! Report command implementations
//!
//! Every report loads one snapshot and derives all of its numbers from it.

use anyhow::Result;
use chrono::NaiveDateTime;
use tally_core::analytics::{CategoryTotal, MonthlyReport};
use tally_core::{
    aggregate_by_category, cashflow_calendar, income_expense_totals, monthly_page, trend_series,
    AnalyticsConfig, Database, Snapshot, TransactionType,
};

use super::{print_json, resolve_month, truncate};

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

pub fn cmd_report_monthly(
    db: &Database,
    config: &AnalyticsConfig,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let snapshot = Snapshot::load(db, month, now)?;
    let page = monthly_page(&snapshot, config);

    if json {
        return print_json(&page);
    }

    let report = &page.report;
    println!();
    println!("📊 Monthly Report: {}", month);
    println!("{}", RULE);
    println!("   Income:  {:>12.2}", report.totals.income);
    println!("   Expense: {:>12.2}", report.totals.expense);
    println!("   Net:     {:>12.2}", report.totals.net);

    print_budget_outcomes(report);

    if let Some(ref cut) = report.cut_down {
        println!();
        println!(
            "   ✂️  Biggest cut: {} ({:.2} → {:.2}, saved {:.2})",
            cut.category, cut.previous_spent, cut.current_spent, cut.difference
        );
    }

    if !report.month_over_month_savings.is_empty() {
        println!();
        println!("   Spending less than last month:");
        for saving in &report.month_over_month_savings {
            println!(
                "     {:20} │ {:>10.2} → {:>10.2} │ -{:.2}",
                truncate(&saving.category, 20),
                saving.previous_spent,
                saving.current_spent,
                saving.saved_amount
            );
        }
    }

    print_category_table(
        "Spending by category",
        &report.totals_per_category,
        report.total_spent,
    );

    Ok(())
}

fn print_budget_outcomes(report: &MonthlyReport) {
    if report.overspent.is_empty() && report.saved.is_empty() {
        return;
    }
    println!();
    println!("   {:20} │ {:>10} │ {:>10} │", "Budget", "Limit", "Spent");
    println!("   ─────────────────────┼────────────┼────────────┼───────────");
    for item in &report.overspent {
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ 🔴 over by {:.2}",
            truncate(&item.category, 20),
            item.budget,
            item.spent,
            item.spent - item.budget
        );
    }
    for item in &report.saved {
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ 🟢 {:.2} left",
            truncate(&item.category, 20),
            item.budget,
            item.spent,
            item.budget - item.spent
        );
    }
}

fn print_category_table(title: &str, rows: &[CategoryTotal], total: f64) {
    println!();
    println!("   {}", title);
    if rows.is_empty() {
        println!("   No transactions in this month.");
        return;
    }
    println!("   {:25} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼────────────┼────────");
    for row in rows {
        let share = if total > 0.0 {
            row.total / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}%",
            truncate(&row.category, 25),
            row.total,
            share
        );
    }
    println!("   Total: {:.2}", total);
}

pub fn cmd_report_categories(
    db: &Database,
    month: Option<&str>,
    tx_type: &str,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let tx_type = tx_type
        .parse::<TransactionType>()
        .map_err(|e| anyhow::anyhow!("{} (use income or expense)", e))?;
    let snapshot = Snapshot::load(db, month, now)?;
    let breakdown = aggregate_by_category(&snapshot.transactions, month, tx_type);

    if json {
        return print_json(&breakdown);
    }

    println!();
    println!("📊 {} by category: {}", capitalize(tx_type.as_str()), month);
    println!("{}", RULE);
    print_category_table("Categories", &breakdown.data, breakdown.total());
    Ok(())
}

pub fn cmd_report_totals(
    db: &Database,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let snapshot = Snapshot::load(db, month, now)?;
    let totals = income_expense_totals(&snapshot.transactions, month);

    if json {
        return print_json(&totals);
    }

    println!();
    println!("💵 Totals: {}", month);
    println!("{}", RULE);
    println!("   Income:  {:>12.2}", totals.income);
    println!("   Expense: {:>12.2}", totals.expense);
    println!("   Net:     {:>12.2}", totals.net);
    Ok(())
}

pub fn cmd_report_trend(
    db: &Database,
    months: usize,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let snapshot = Snapshot::load(db, tally_core::MonthKey::current(now), now)?;
    let trend = trend_series(&snapshot.transactions, now, months);

    if json {
        return print_json(&trend);
    }

    println!();
    println!("📈 Trend: last {} months", months);
    println!("{}", RULE);
    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expense", "Net"
    );
    println!("   ─────────┼──────────────┼──────────────┼──────────────");
    for point in &trend {
        println!(
            "   {:8} │ {:>12.2} │ {:>12.2} │ {:>12.2}",
            point.month_key.to_string(),
            point.income,
            point.expense,
            point.net
        );
    }
    Ok(())
}

pub fn cmd_report_cashflow(
    db: &Database,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let snapshot = Snapshot::load(db, month, now)?;
    let calendar = cashflow_calendar(&snapshot.transactions, month);

    if json {
        return print_json(&calendar);
    }

    println!();
    println!("📅 Cashflow: {}", month);
    println!("{}", RULE);
    println!(
        "   {:>3} │ {:>10} │ {:>10} │ {:>10}",
        "Day", "Income", "Expense", "Net"
    );
    println!("   ────┼────────────┼────────────┼────────────");
    for day in calendar
        .days
        .iter()
        .filter(|d| d.income != 0.0 || d.expense != 0.0)
    {
        println!(
            "   {:>3} │ {:>10.2} │ {:>10.2} │ {:>10.2}",
            day.day, day.income, day.expense, day.net
        );
    }
    println!("   ({} days in month, quiet days hidden)", calendar.days.len());
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
