//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use tally_core::{Database, NewTransaction, Transaction, TransactionFilter, TransactionType};

use super::{parse_date_arg, print_json, resolve_month, truncate};
use crate::cli::ListArgs;

/// Fields to change on `tally edit`; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct TransactionEdit {
    pub tx_type: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>()
        .map_err(|e| anyhow::anyhow!("{} (use income or expense)", e))
}

fn print_transaction_row(tx: &Transaction) {
    let amount_str = match tx.tx_type {
        TransactionType::Expense => format!("\x1b[31m-{:.2}\x1b[0m", tx.amount), // Red for expenses
        TransactionType::Income => format!("\x1b[32m+{:.2}\x1b[0m", tx.amount),  // Green for income
    };

    println!(
        "   [{:>4}] {} │ {:>20} │ {:15} │ {}",
        tx.id,
        tx.date.format("%Y-%m-%d"),
        amount_str,
        truncate(&tx.category, 15),
        truncate(tx.description_text().unwrap_or(""), 35)
    );
}

pub fn cmd_add(
    db: &Database,
    tx_type: &str,
    amount: f64,
    category: &str,
    description: Option<&str>,
    date: Option<&str>,
    now: NaiveDateTime,
) -> Result<()> {
    let mut tx = NewTransaction::new(parse_type(tx_type)?, amount, category);
    if let Some(description) = description {
        tx = tx.with_description(description);
    }
    if let Some(date) = date {
        tx = tx.with_date(parse_date_arg(date)?);
    }

    let created = db
        .insert_transaction(tx, now)
        .context("Failed to add transaction")?;

    println!(
        "✅ Added {} #{}: {:.2} in {}",
        created.tx_type, created.id, created.amount, created.category
    );
    Ok(())
}

pub fn cmd_edit(
    db: &Database,
    id: i64,
    changes: TransactionEdit,
    now: NaiveDateTime,
) -> Result<()> {
    let current = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let tx_type = match changes.tx_type.as_deref() {
        Some(t) => parse_type(t)?,
        None => current.tx_type,
    };
    let date = match changes.date.as_deref() {
        Some(d) => parse_date_arg(d)?,
        None => current.date,
    };
    let mut replacement = NewTransaction::new(
        tx_type,
        changes.amount.unwrap_or(current.amount),
        changes.category.unwrap_or(current.category),
    )
    .with_date(date);
    replacement.description = changes.description.or(current.description);

    let updated = db.update_transaction(id, replacement, now)?;
    println!("✅ Updated transaction #{}", updated.id);
    print_transaction_row(&updated);
    Ok(())
}

pub fn cmd_delete(db: &Database, ids: &[i64]) -> Result<()> {
    let deleted = db.delete_transactions(ids)?;
    if deleted < ids.len() {
        tracing::warn!(
            "{} of {} transactions were not found",
            ids.len() - deleted,
            ids.len()
        );
    }
    println!("🗑️  Deleted {} transaction(s)", deleted);
    Ok(())
}

pub fn cmd_recategorize(db: &Database, ids: &[i64], category: &str) -> Result<()> {
    let updated = db.recategorize_transactions(ids, category)?;
    println!(
        "✅ Moved {} transaction(s) to {}",
        updated,
        category.trim()
    );
    Ok(())
}

/// Build the store filter from `tally list` arguments
pub fn list_filter(args: &ListArgs, now: NaiveDateTime) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::new()
        .tx_type(args.tx_type.as_deref().map(parse_type).transpose()?)
        .category(args.category.as_deref())
        .amount_range(args.min, args.max)
        .search(args.search.as_deref());

    if args.month.is_some() {
        filter = filter.in_month(resolve_month(args.month.as_deref(), now)?);
    }
    if let Some(ref from) = args.from {
        filter = filter.from(Some(parse_date_arg(from)?));
    }
    if let Some(ref to) = args.to {
        let mut end = parse_date_arg(to)?;
        // A bare date covers the whole day
        if !to.trim().contains(' ') {
            end = end + Duration::days(1) - Duration::seconds(1);
        }
        filter = filter.to(Some(end));
    }
    Ok(filter)
}

pub fn cmd_list(db: &Database, args: &ListArgs, now: NaiveDateTime, json: bool) -> Result<()> {
    let filter = list_filter(args, now)?;
    let mut transactions = db.list_transactions(&filter)?;
    transactions.truncate(args.limit);

    if json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  tally add --type expense --amount 12.50 --category Food");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        print_transaction_row(tx);
    }

    Ok(())
}
