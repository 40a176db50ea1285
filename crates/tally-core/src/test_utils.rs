//! Fixture builders for tests
//!
//! Timestamps are fixed so time-dependent heuristics can be exercised
//! against a known "now".

use chrono::{NaiveDate, NaiveDateTime};

use crate::category::normalize_category;
use crate::models::{Budget, Transaction, TransactionType};
use crate::month::MonthKey;

/// Noon on the given day
pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at_time(year, month, day, 12, 0)
}

pub fn at_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid fixture date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid fixture time")
}

pub fn transaction(
    id: i64,
    tx_type: TransactionType,
    amount: f64,
    category: &str,
    date: NaiveDateTime,
) -> Transaction {
    Transaction {
        id,
        tx_type,
        amount,
        category: category.to_string(),
        category_normalized: normalize_category(Some(category)),
        description: None,
        date,
    }
}

pub fn expense(id: i64, amount: f64, category: &str, date: NaiveDateTime) -> Transaction {
    transaction(id, TransactionType::Expense, amount, category, date)
}

pub fn income(id: i64, amount: f64, category: &str, date: NaiveDateTime) -> Transaction {
    transaction(id, TransactionType::Income, amount, category, date)
}

pub fn budget(id: i64, category: &str, amount: f64, month: &str) -> Budget {
    Budget {
        id,
        category: category.to_string(),
        category_normalized: normalize_category(Some(category)),
        amount,
        month_key: month_key(month),
    }
}

pub fn month_key(key: &str) -> MonthKey {
    key.parse().expect("valid fixture month key")
}

/// Builder-style tweaks for fixture transactions
pub trait TransactionFixture {
    fn with_description(self, description: &str) -> Self;
}

impl TransactionFixture for Transaction {
    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}
