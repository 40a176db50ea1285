//! Transaction query filter
//!
//! The same filter is evaluated in memory by [`MemoryStore`](super::MemoryStore)
//! and translated to SQL by the SQLite store.

use chrono::NaiveDateTime;

use crate::category::normalize_category;
use crate::models::{Transaction, TransactionType};
use crate::month::MonthKey;

/// Filter for listing transactions. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub tx_type: Option<TransactionType>,
    /// Normalized category
    pub category: Option<String>,
    /// Inclusive lower bound
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound
    pub to: Option<NaiveDateTime>,
    /// Exclusive upper bound
    pub before: Option<NaiveDateTime>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Case-insensitive substring of description or category
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_type(mut self, tx_type: Option<TransactionType>) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Set category filter (normalized before comparison)
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(|c| normalize_category(Some(c)));
        self
    }

    pub fn from(mut self, from: Option<NaiveDateTime>) -> Self {
        self.from = from;
        self
    }

    pub fn to(mut self, to: Option<NaiveDateTime>) -> Self {
        self.to = to;
        self
    }

    /// Restrict to the half-open range of `month`
    pub fn in_month(mut self, month: MonthKey) -> Self {
        let range = month.range();
        self.from = Some(range.start);
        self.before = Some(range.end);
        self
    }

    pub fn amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn search(mut self, query: Option<&str>) -> Self {
        self.search = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(tx_type) = self.tx_type {
            if tx.tx_type != tx_type {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &tx.category_normalized != category {
                return false;
            }
        }
        if self.from.is_some_and(|from| tx.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.date > to) {
            return false;
        }
        if self.before.is_some_and(|before| tx.date >= before) {
            return false;
        }
        if self.min_amount.is_some_and(|min| tx.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        if let Some(ref query) = self.search {
            let query = query.to_lowercase();
            let in_description = tx
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_description && !tx.category.to_lowercase().contains(&query) {
                return false;
            }
        }
        true
    }
}
