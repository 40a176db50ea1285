//! Transaction operations

use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, OptionalExtension};
use tracing::debug;

use super::{format_datetime, parse_datetime, transaction_filter, Database};
use crate::category::normalize_category;
use crate::error::{Error, Result};
use crate::import::ImportSummary;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::store::TransactionFilter;

const SELECT_COLUMNS: &str =
    "SELECT id, tx_type, amount, category, category_normalized, description, date FROM transactions";

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

impl Database {
    /// Insert a transaction; `now` fills in a missing date
    pub fn insert_transaction(&self, tx: NewTransaction, now: NaiveDateTime) -> Result<Transaction> {
        tx.validate()?;
        let conn = self.conn()?;
        let import_hash = tx.import_hash.clone();
        let stored = tx.into_transaction(0, now);

        conn.execute(
            r#"
            INSERT INTO transactions (tx_type, amount, category, category_normalized, description, date, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                stored.tx_type.as_str(),
                stored.amount,
                stored.category,
                stored.category_normalized,
                stored.description,
                format_datetime(&stored.date),
                import_hash,
            ],
        )?;

        Ok(Transaction {
            id: conn.last_insert_rowid(),
            ..stored
        })
    }

    /// Insert imported transactions in one SQL transaction, skipping any
    /// whose import hash is already stored
    pub fn import_transactions(
        &self,
        txs: Vec<NewTransaction>,
        now: NaiveDateTime,
    ) -> Result<ImportSummary> {
        for tx in &txs {
            tx.validate()?;
        }

        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;
        let mut summary = ImportSummary::default();
        {
            let mut stmt = db_tx.prepare(
                r#"
                INSERT OR IGNORE INTO transactions (tx_type, amount, category, category_normalized, description, date, import_hash)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )?;
            for tx in txs {
                let import_hash = tx.import_hash.clone();
                let stored = tx.into_transaction(0, now);
                let changed = stmt.execute(params![
                    stored.tx_type.as_str(),
                    stored.amount,
                    stored.category,
                    stored.category_normalized,
                    stored.description,
                    format_datetime(&stored.date),
                    import_hash,
                ])?;
                if changed == 0 {
                    summary.skipped += 1;
                } else {
                    summary.imported += 1;
                }
            }
        }
        db_tx.commit()?;

        debug!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Import complete"
        );
        Ok(summary)
    }

    /// Replace a transaction wholesale, keeping its id
    pub fn update_transaction(
        &self,
        id: i64,
        tx: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<Transaction> {
        tx.validate()?;
        let conn = self.conn()?;
        let stored = tx.into_transaction(id, now);

        let changed = conn.execute(
            r#"
            UPDATE transactions
            SET tx_type = ?, amount = ?, category = ?, category_normalized = ?,
                description = ?, date = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
            params![
                stored.tx_type.as_str(),
                stored.amount,
                stored.category,
                stored.category_normalized,
                stored.description,
                format_datetime(&stored.date),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }
        Ok(stored)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }
        Ok(())
    }

    /// Delete several transactions; returns how many existed
    pub fn delete_transactions(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let conn = self.conn()?;
        let sql = format!(
            "DELETE FROM transactions WHERE id IN ({})",
            placeholders(ids.len())
        );
        Ok(conn.execute(&sql, params_from_iter(ids.iter()))?)
    }

    /// Move several transactions to `category`, keeping the normalized
    /// column in sync. Returns how many were updated.
    pub fn recategorize_transactions(&self, ids: &[i64], category: &str) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let category = category.trim();
        let normalized = normalize_category(Some(category));

        let conn = self.conn()?;
        let sql = format!(
            "UPDATE transactions SET category = ?, category_normalized = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut values: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(category.to_string()), Box::new(normalized)];
        values.extend(ids.iter().map(|id| Box::new(*id) as Box<dyn rusqlite::ToSql>));

        Ok(conn.execute(&sql, params_from_iter(values.iter()))?)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?", SELECT_COLUMNS))?;
        let transaction = stmt
            .query_row(params![id], Self::row_to_transaction)
            .optional()?;
        Ok(transaction)
    }

    /// Transactions matching `filter`, newest first
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let built = transaction_filter::build(filter);
        let sql = format!(
            "{} {} ORDER BY date DESC, id DESC",
            SELECT_COLUMNS, built.where_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_from_iter(built.params.iter()), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let tx_type: String = row.get(1)?;
        let date: String = row.get(6)?;
        Ok(Transaction {
            id: row.get(0)?,
            tx_type: tx_type.parse::<TransactionType>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    e.into(),
                )
            })?,
            amount: row.get(2)?,
            category: row.get(3)?,
            category_normalized: row.get(4)?,
            description: row.get(5)?,
            date: parse_datetime(6, &date)?,
        })
    }
}
