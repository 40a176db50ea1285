//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};
use crate::month::MonthKey;

const SELECT_COLUMNS: &str =
    "SELECT id, category, category_normalized, amount, month_key FROM budgets";

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Map a UNIQUE(month_key, category_normalized) failure to a domain error
fn duplicate_or(err: rusqlite::Error, budget: &Budget) -> Error {
    if is_unique_violation(&err) {
        Error::DuplicateBudget {
            month_key: budget.month_key.to_string(),
            category: budget.category.clone(),
        }
    } else {
        Error::Database(err)
    }
}

impl Database {
    /// Create a budget. Fails with [`Error::DuplicateBudget`] when the month
    /// already has one for the same normalized category.
    pub fn insert_budget(&self, budget: NewBudget) -> Result<Budget> {
        budget.validate()?;
        let conn = self.conn()?;
        let stored = budget.into_budget(0);

        conn.execute(
            "INSERT INTO budgets (category, category_normalized, amount, month_key) VALUES (?, ?, ?, ?)",
            params![
                stored.category,
                stored.category_normalized,
                stored.amount,
                stored.month_key.to_string(),
            ],
        )
        .map_err(|e| duplicate_or(e, &stored))?;

        Ok(Budget {
            id: conn.last_insert_rowid(),
            ..stored
        })
    }

    /// Replace a budget's category, amount and month
    pub fn update_budget(&self, id: i64, budget: NewBudget) -> Result<Budget> {
        budget.validate()?;
        let conn = self.conn()?;
        let stored = budget.into_budget(id);

        let changed = conn
            .execute(
                "UPDATE budgets SET category = ?, category_normalized = ?, amount = ?, month_key = ?
                 WHERE id = ?",
                params![
                    stored.category,
                    stored.category_normalized,
                    stored.amount,
                    stored.month_key.to_string(),
                    id,
                ],
            )
            .map_err(|e| duplicate_or(e, &stored))?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Budget {}", id)));
        }
        Ok(stored)
    }

    /// Set the limit for a category and month, creating the budget if needed
    pub fn upsert_budget(&self, budget: NewBudget) -> Result<Budget> {
        let existing = self
            .list_budgets(budget.month_key)?
            .into_iter()
            .find(|b| b.category_normalized == budget.category_normalized());
        match existing {
            Some(found) => self.update_budget(found.id, budget),
            None => self.insert_budget(budget),
        }
    }

    pub fn delete_budget(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Budget {}", id)));
        }
        Ok(())
    }

    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?", SELECT_COLUMNS))?;
        let budget = stmt
            .query_row(params![id], Self::row_to_budget)
            .optional()?;
        Ok(budget)
    }

    /// Budgets for `month`, ordered by category label
    pub fn list_budgets(&self, month: MonthKey) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE month_key = ? ORDER BY category ASC",
            SELECT_COLUMNS
        ))?;
        let budgets = stmt
            .query_map(params![month.to_string()], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let month_key: String = row.get(4)?;
        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            category_normalized: row.get(2)?,
            amount: row.get(3)?,
            month_key: month_key.parse().map_err(|e: Error| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
        })
    }
}
