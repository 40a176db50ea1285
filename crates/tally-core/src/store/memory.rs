//! In-memory record store

use chrono::NaiveDateTime;

use super::{RecordStore, TransactionFilter};
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget, NewTransaction, Transaction};
use crate::month::MonthKey;

/// Vec-backed store with the same invariants as the SQLite store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (budget uniqueness is still enforced)
    pub fn from_records(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Result<Self> {
        let next_id = transactions
            .iter()
            .map(|t| t.id)
            .chain(budgets.iter().map(|b| b.id))
            .max()
            .unwrap_or(0);
        let mut store = Self {
            transactions,
            budgets: Vec::with_capacity(budgets.len()),
            next_id,
        };
        for budget in budgets {
            store.ensure_unique_budget(
                budget.month_key,
                &budget.category_normalized,
                &budget.category,
            )?;
            store.budgets.push(budget);
        }
        Ok(store)
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert_transaction(
        &mut self,
        tx: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<Transaction> {
        tx.validate()?;
        let id = self.allocate_id();
        let tx = tx.into_transaction(id, now);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    pub fn insert_budget(&mut self, budget: NewBudget) -> Result<Budget> {
        budget.validate()?;
        self.ensure_unique_budget(
            budget.month_key,
            &budget.category_normalized(),
            &budget.category,
        )?;
        let id = self.allocate_id();
        let budget = budget.into_budget(id);
        self.budgets.push(budget.clone());
        Ok(budget)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
        Ok(self.transactions.remove(index))
    }

    fn ensure_unique_budget(
        &self,
        month: MonthKey,
        normalized: &str,
        category: &str,
    ) -> Result<()> {
        let clash = self
            .budgets
            .iter()
            .any(|b| b.month_key == month && b.category_normalized == normalized);
        if clash {
            return Err(Error::DuplicateBudget {
                month_key: month.to_string(),
                category: category.to_string(),
            });
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut matched: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    fn list_budgets(&self, month: MonthKey) -> Result<Vec<Budget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.month_key == month)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::store::Snapshot;
    use crate::test_utils::*;

    #[test]
    fn test_insert_and_list_newest_first() {
        let mut store = MemoryStore::new();
        let now = at(2024, 5, 20);
        store
            .insert_transaction(
                NewTransaction::new(TransactionType::Expense, 10.0, "Food")
                    .with_date(at(2024, 5, 1)),
                now,
            )
            .unwrap();
        let undated = store
            .insert_transaction(NewTransaction::new(TransactionType::Income, 99.0, "Salary"), now)
            .unwrap();
        assert_eq!(undated.date, now);

        let listed = store.list_transactions(&TransactionFilter::new()).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, undated.id);
    }

    #[test]
    fn test_same_timestamp_lists_highest_id_first() {
        let store = MemoryStore::from_records(
            vec![
                expense(1, 100.0, "Rent", at(2024, 5, 1)),
                expense(2, 100.0, "Food", at(2024, 5, 1)),
                expense(3, 5.0, "Coffee", at(2024, 4, 30)),
            ],
            vec![],
        )
        .unwrap();
        let ids: Vec<i64> = store
            .list_transactions(&TransactionFilter::new())
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_duplicate_budget_rejected() {
        let mut store = MemoryStore::new();
        let may = month_key("2024-05");
        store.insert_budget(NewBudget::new("Groceries", 300.0, may)).unwrap();

        let err = store
            .insert_budget(NewBudget::new(" groceries", 400.0, may))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateBudget { .. }));

        // Same category in another month is fine
        store
            .insert_budget(NewBudget::new("Groceries", 300.0, month_key("2024-06")))
            .unwrap();
        assert_eq!(store.list_budgets(may).unwrap().len(), 1);
    }

    #[test]
    fn test_from_records_checks_budgets() {
        let result = MemoryStore::from_records(
            vec![],
            vec![budget(1, "Rent", 1.0, "2024-01"), budget(2, "RENT", 2.0, "2024-01")],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut store = MemoryStore::new();
        let result = store.insert_transaction(
            NewTransaction::new(TransactionType::Expense, -5.0, "Food"),
            at(2024, 1, 1),
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_snapshot_load() {
        let store = MemoryStore::from_records(
            vec![expense(1, 5.0, "Food", at(2024, 2, 3))],
            vec![budget(2, "Food", 100.0, "2024-02"), budget(3, "Food", 100.0, "2024-03")],
        )
        .unwrap();
        let snapshot = Snapshot::load(&store, month_key("2024-02"), at(2024, 2, 10)).unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.budgets.len(), 1);

        let next_id = MemoryStore::from_records(vec![], vec![]).unwrap().allocate_id();
        assert_eq!(next_id, 1);
    }
}
