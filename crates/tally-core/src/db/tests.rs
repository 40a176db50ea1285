//! Database tests

use super::*;
use crate::error::Error;
use crate::models::{NewBudget, NewTransaction, TransactionType};
use crate::store::Snapshot;
use crate::test_utils::{at, at_time, month_key};

fn now() -> NaiveDateTime {
    at(2024, 6, 15)
}

fn add(
    db: &Database,
    tx_type: TransactionType,
    amount: f64,
    category: &str,
    date: NaiveDateTime,
) -> Transaction {
    db.insert_transaction(
        NewTransaction::new(tx_type, amount, category).with_date(date),
        now(),
    )
    .unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_transactions().unwrap(), 0);
    assert!(db.list_budgets(month_key("2024-06")).unwrap().is_empty());
}

#[test]
fn test_transaction_roundtrip() {
    let db = Database::in_memory().unwrap();
    let created = db
        .insert_transaction(
            NewTransaction::new(TransactionType::Expense, 12.75, " Groceries ")
                .with_description("Corner shop")
                .with_date(at_time(2024, 6, 3, 18, 45)),
            now(),
        )
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.category, "Groceries");
    assert_eq!(created.category_normalized, "groceries");

    let fetched = db.get_transaction(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert!(db.get_transaction(created.id + 100).unwrap().is_none());
}

#[test]
fn test_missing_date_defaults_to_now() {
    let db = Database::in_memory().unwrap();
    let tx = db
        .insert_transaction(
            NewTransaction::new(TransactionType::Income, 100.0, "Gift"),
            now(),
        )
        .unwrap();
    assert_eq!(db.get_transaction(tx.id).unwrap().unwrap().date, now());
}

#[test]
fn test_negative_amount_rejected() {
    let db = Database::in_memory().unwrap();
    let result = db.insert_transaction(
        NewTransaction::new(TransactionType::Expense, -5.0, "Food"),
        now(),
    );
    assert!(matches!(result, Err(Error::InvalidData(_))));
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_update_replaces_wholesale() {
    let db = Database::in_memory().unwrap();
    let tx = db
        .insert_transaction(
            NewTransaction::new(TransactionType::Expense, 10.0, "Food")
                .with_description("lunch")
                .with_date(at(2024, 6, 1)),
            now(),
        )
        .unwrap();

    let updated = db
        .update_transaction(
            tx.id,
            NewTransaction::new(TransactionType::Expense, 15.0, "Dining Out")
                .with_date(at(2024, 6, 2)),
            now(),
        )
        .unwrap();

    let fetched = db.get_transaction(tx.id).unwrap().unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.amount, 15.0);
    assert_eq!(fetched.category_normalized, "dining out");
    assert!(fetched.description.is_none());

    let missing = db.update_transaction(
        999,
        NewTransaction::new(TransactionType::Expense, 1.0, "x"),
        now(),
    );
    assert!(matches!(missing, Err(Error::NotFound(_))));
}

#[test]
fn test_delete_and_bulk_delete() {
    let db = Database::in_memory().unwrap();
    let a = add(&db, TransactionType::Expense, 1.0, "A", at(2024, 6, 1));
    let b = add(&db, TransactionType::Expense, 2.0, "B", at(2024, 6, 2));
    let c = add(&db, TransactionType::Expense, 3.0, "C", at(2024, 6, 3));

    db.delete_transaction(a.id).unwrap();
    assert!(matches!(
        db.delete_transaction(a.id),
        Err(Error::NotFound(_))
    ));

    assert_eq!(db.delete_transactions(&[b.id, c.id, 12345]).unwrap(), 2);
    assert_eq!(db.delete_transactions(&[]).unwrap(), 0);
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_recategorize_keeps_normalized_in_sync() {
    let db = Database::in_memory().unwrap();
    let a = add(&db, TransactionType::Expense, 1.0, "misc", at(2024, 6, 1));
    let b = add(&db, TransactionType::Expense, 2.0, "misc", at(2024, 6, 2));
    let c = add(&db, TransactionType::Expense, 3.0, "misc", at(2024, 6, 3));

    let changed = db
        .recategorize_transactions(&[a.id, b.id], "  Eating Out ")
        .unwrap();
    assert_eq!(changed, 2);

    let moved = db
        .list_transactions(&TransactionFilter::new().category(Some("eating out")))
        .unwrap();
    assert_eq!(moved.len(), 2);
    assert!(moved.iter().all(|t| t.category == "Eating Out"));
    assert_eq!(db.get_transaction(c.id).unwrap().unwrap().category, "misc");
}

#[test]
fn test_list_filters_and_order() {
    let db = Database::in_memory().unwrap();
    add(&db, TransactionType::Income, 3000.0, "Salary", at(2024, 5, 31));
    add(&db, TransactionType::Expense, 40.0, "Food", at(2024, 6, 1));
    let cafe = db
        .insert_transaction(
            NewTransaction::new(TransactionType::Expense, 8.5, "Food")
                .with_description("Blue Cafe")
                .with_date(at(2024, 6, 10)),
            now(),
        )
        .unwrap();
    add(&db, TransactionType::Expense, 900.0, "Rent", at_time(2024, 7, 1, 0, 0));

    let all = db.list_transactions(&TransactionFilter::new()).unwrap();
    let dates: Vec<NaiveDateTime> = all.iter().map(|t| t.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);

    let june = db
        .list_transactions(&TransactionFilter::new().in_month(month_key("2024-06")))
        .unwrap();
    assert_eq!(june.len(), 2);

    let expenses = db
        .list_transactions(&TransactionFilter::new().tx_type(Some(TransactionType::Expense)))
        .unwrap();
    assert_eq!(expenses.len(), 3);

    let cheap = db
        .list_transactions(&TransactionFilter::new().amount_range(None, Some(50.0)))
        .unwrap();
    assert_eq!(cheap.len(), 2);

    let searched = db
        .list_transactions(&TransactionFilter::new().search(Some("blue cafe")))
        .unwrap();
    assert_eq!(searched, vec![cafe]);

    let by_category = db
        .list_transactions(&TransactionFilter::new().search(Some("SAL")))
        .unwrap();
    assert_eq!(by_category.len(), 1);

    let inclusive = db
        .list_transactions(
            &TransactionFilter::new()
                .from(Some(at(2024, 6, 1)))
                .to(Some(at(2024, 6, 10))),
        )
        .unwrap();
    assert_eq!(inclusive.len(), 2);
}

#[test]
fn test_sql_filter_matches_in_memory_filter() {
    let db = Database::in_memory().unwrap();
    add(&db, TransactionType::Expense, 5.0, "Coffee", at(2024, 6, 1));
    add(&db, TransactionType::Expense, 50.0, "Food", at(2024, 6, 2));
    add(&db, TransactionType::Income, 500.0, "Side gig", at(2024, 6, 3));

    let all = db.list_transactions(&TransactionFilter::new()).unwrap();
    let filters = vec![
        TransactionFilter::new().category(Some("COFFEE")),
        TransactionFilter::new().amount_range(Some(5.0), Some(50.0)),
        TransactionFilter::new().search(Some("gig")),
        TransactionFilter::new().tx_type(Some(TransactionType::Income)),
    ];
    for filter in filters {
        let from_sql = db.list_transactions(&filter).unwrap();
        let in_memory: Vec<Transaction> =
            all.iter().filter(|t| filter.matches(t)).cloned().collect();
        assert_eq!(from_sql, in_memory, "{:?}", filter);
    }
}

#[test]
fn test_import_dedupes_by_hash() {
    let db = Database::in_memory().unwrap();
    let csv = "date,type,amount,category,description
2024-06-01,expense,499,Subscriptions,Netflix
2024-06-02,expense,12,Food,Lunch
";
    let first = db
        .import_transactions(crate::import::parse_csv(csv.as_bytes()).unwrap(), now())
        .unwrap();
    assert_eq!(first.imported, 2);
    assert_eq!(first.skipped, 0);

    let second = db
        .import_transactions(crate::import::parse_csv(csv.as_bytes()).unwrap(), now())
        .unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(db.count_transactions().unwrap(), 2);
}

#[test]
fn test_budget_crud_and_uniqueness() {
    let db = Database::in_memory().unwrap();
    let june = month_key("2024-06");

    let rent = db.insert_budget(NewBudget::new("Rent", 1000.0, june)).unwrap();
    db.insert_budget(NewBudget::new("Food", 400.0, june)).unwrap();
    db.insert_budget(NewBudget::new("Rent", 1000.0, month_key("2024-07")))
        .unwrap();

    let duplicate = db.insert_budget(NewBudget::new(" rent ", 900.0, june));
    match duplicate {
        Err(Error::DuplicateBudget { month_key, category }) => {
            assert_eq!(month_key, "2024-06");
            assert_eq!(category, "rent");
        }
        other => panic!("expected duplicate budget error, got {:?}", other),
    }

    let listed = db.list_budgets(june).unwrap();
    let names: Vec<&str> = listed.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent"]);

    let updated = db
        .update_budget(rent.id, NewBudget::new("Rent", 1200.0, june))
        .unwrap();
    assert_eq!(updated.amount, 1200.0);
    assert_eq!(db.get_budget(rent.id).unwrap().unwrap(), updated);

    db.delete_budget(rent.id).unwrap();
    assert!(matches!(db.delete_budget(rent.id), Err(Error::NotFound(_))));
    assert_eq!(db.list_budgets(june).unwrap().len(), 1);
}

#[test]
fn test_upsert_budget() {
    let db = Database::in_memory().unwrap();
    let june = month_key("2024-06");
    let first = db.upsert_budget(NewBudget::new("Food", 300.0, june)).unwrap();
    let second = db.upsert_budget(NewBudget::new("FOOD", 350.0, june)).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, 350.0);
    assert_eq!(db.list_budgets(june).unwrap().len(), 1);
}

#[test]
fn test_snapshot_from_database() {
    let db = Database::in_memory().unwrap();
    let june = month_key("2024-06");
    add(&db, TransactionType::Expense, 20.0, "Food", at(2024, 6, 1));
    db.insert_budget(NewBudget::new("Food", 100.0, june)).unwrap();
    db.insert_budget(NewBudget::new("Food", 100.0, month_key("2024-05")))
        .unwrap();

    let snapshot = Snapshot::load(&db, june, now()).unwrap();
    assert_eq!(snapshot.transactions.len(), 1);
    assert_eq!(snapshot.budgets.len(), 1);
    assert_eq!(snapshot.taken_at, now());
}
