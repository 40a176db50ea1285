//! Record store abstraction
//!
//! The analytics engine never reads storage directly. Callers fetch records
//! through a [`RecordStore`] into a [`Snapshot`] and run every report of a
//! page against that one snapshot, so panels never disagree on totals.
//!
//! - `filter` - Transaction query filter shared by all stores
//! - `memory` - Vec-backed store for tests and embedding

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::Result;
use crate::models::{Budget, Transaction};
use crate::month::MonthKey;

mod filter;
mod memory;

pub use filter::TransactionFilter;
pub use memory::MemoryStore;

/// Read-only source of transactions and budgets.
///
/// Storage and transport errors are returned unchanged to the caller.
pub trait RecordStore {
    /// Transactions matching `filter`, newest first
    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Budgets defined for `month`
    fn list_budgets(&self, month: MonthKey) -> Result<Vec<Budget>>;
}

/// Records fetched together at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub month: MonthKey,
    pub taken_at: NaiveDateTime,
}

impl Snapshot {
    /// Fetch every transaction plus the budgets of `month`
    pub fn load<S: RecordStore + ?Sized>(
        store: &S,
        month: MonthKey,
        now: NaiveDateTime,
    ) -> Result<Self> {
        Self::load_filtered(store, &TransactionFilter::new(), month, now)
    }

    pub fn load_filtered<S: RecordStore + ?Sized>(
        store: &S,
        filter: &TransactionFilter,
        month: MonthKey,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let transactions = store.list_transactions(filter)?;
        let budgets = store.list_budgets(month)?;
        debug!(
            month = %month,
            transactions = transactions.len(),
            budgets = budgets.len(),
            "Snapshot loaded"
        );
        Ok(Self {
            transactions,
            budgets,
            month,
            taken_at: now,
        })
    }
}
