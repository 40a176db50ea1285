//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Analytics config resolution
//! - `resolve_month` / `parse_date_arg` - Argument parsing shared by commands
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tally_core::{AnalyticsConfig, Database, MonthKey};

/// Wall-clock time used as "now" for one CLI invocation
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tracing::debug!("Opening database at {}", path_str);
    Database::new(path_str).context("Failed to open database")
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

/// `--month` value, or the month of `now` when omitted
pub fn resolve_month(month: Option<&str>, now: NaiveDateTime) -> Result<MonthKey> {
    Ok(MonthKey::resolve(month, now)?)
}

pub fn parse_date_arg(date: &str) -> Result<NaiveDateTime> {
    tally_core::import::parse_date(date)
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", date))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: tally add --type expense --amount 12.50 --category Food");
    println!("  2. Import a CSV file:    tally import --file transactions.csv");
    println!("  3. Set a budget:         tally budget set --category Food --amount 400");

    Ok(())
}
