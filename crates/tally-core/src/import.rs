//! CSV import
//!
//! Expected columns (header names are matched case-insensitively, in any
//! order): `date,type,amount,category,description`. Only `date` and `amount`
//! are required. When `type` is blank the sign of the amount decides it:
//! negative amounts are expenses, everything else income.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::category::normalize_category;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionType};

/// Outcome of importing one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    /// Rows whose import hash was already stored
    pub skipped: usize,
}

struct Columns {
    date: usize,
    tx_type: Option<usize>,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            date: find("date").ok_or_else(|| Error::Import("Missing 'date' column".into()))?,
            tx_type: find("type"),
            amount: find("amount")
                .ok_or_else(|| Error::Import("Missing 'amount' column".into()))?,
            category: find("category"),
            description: find("description"),
        })
    }
}

/// Parse a CSV file into transactions ready to insert.
///
/// Each transaction carries an import hash so re-importing the same file
/// does not create duplicates.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(str::is_empty) {
            continue;
        }
        let tx = parse_record(&record, &columns).map_err(|e| match e {
            Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
            other => other,
        })?;
        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Parsed CSV transactions");
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> Result<NewTransaction> {
    let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty());

    let date = parse_date(
        field(Some(columns.date)).ok_or_else(|| Error::Import("Missing date".into()))?,
    )?;
    let raw_amount = parse_amount(
        field(Some(columns.amount)).ok_or_else(|| Error::Import("Missing amount".into()))?,
    )?;

    let tx_type = match field(columns.tx_type) {
        Some(t) => t.parse::<TransactionType>().map_err(Error::Import)?,
        None if raw_amount < 0.0 => TransactionType::Expense,
        None => TransactionType::Income,
    };
    let amount = raw_amount.abs();
    let category = field(columns.category).unwrap_or_default().to_string();
    let description = field(columns.description).map(str::to_string);

    let import_hash = generate_hash(&date, tx_type, amount, &category, description.as_deref());

    let mut tx = NewTransaction::new(tx_type, amount, category).with_date(date);
    tx.description = description;
    tx.import_hash = Some(import_hash);
    Ok(tx)
}

/// Generate a unique hash for deduplication
fn generate_hash(
    date: &NaiveDateTime,
    tx_type: TransactionType,
    amount: f64,
    category: &str,
    description: Option<&str>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(tx_type.as_str().as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(normalize_category(Some(category)).as_bytes());
    hasher.update(description.unwrap_or_default().trim().as_bytes());
    hex::encode(hasher.finalize())
}

/// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM:SS`
pub fn parse_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '₹', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}
