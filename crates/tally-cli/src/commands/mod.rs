//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, load_config, month resolution)
//! - `transactions` - Add, edit, delete, recategorize and list transactions
//! - `import` - CSV import
//! - `budgets` - Budget set/list/delete
//! - `reports` - Monthly, category, totals, trend and cashflow reports
//! - `insights` - Insight engine and alerts

pub mod budgets;
pub mod core;
pub mod import;
pub mod insights;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use import::*;
pub use insights::*;
pub use reports::*;
pub use transactions::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print any report shape as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
