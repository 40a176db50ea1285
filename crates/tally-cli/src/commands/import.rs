//! Import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tally_core::{import::parse_csv, Database, ImportSummary};

pub fn cmd_import(db: &Database, file: &Path, now: NaiveDateTime) -> Result<ImportSummary> {
    println!("📥 Importing transactions from {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let transactions = parse_csv(reader).context("Failed to parse CSV")?;
    println!("   Parsed {} transactions", transactions.len());

    let summary = db.import_transactions(transactions, now)?;
    tracing::debug!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Imported {}",
        file.display()
    );

    println!("✅ Import complete!");
    println!("   Imported: {}", summary.imported);
    if summary.skipped > 0 {
        println!("   Skipped:  {} (already imported)", summary.skipped);
    }

    Ok(summary)
}
