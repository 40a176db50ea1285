//! Day-by-day cashflow grid for one month

use chrono::Datelike;

use super::types::{CashflowCalendar, CashflowDay};
use crate::models::{Transaction, TransactionType};
use crate::month::MonthKey;

/// One entry per calendar day of `month`, zeros where nothing happened
pub fn cashflow_calendar(records: &[Transaction], month: MonthKey) -> CashflowCalendar {
    let mut days: Vec<CashflowDay> = (1..=month.days_in_month())
        .map(|day| CashflowDay {
            day,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        })
        .collect();

    let range = month.range();
    for tx in records.iter().filter(|t| range.contains(t.date)) {
        let slot = &mut days[tx.date.day0() as usize];
        match tx.tx_type {
            TransactionType::Income => slot.income += tx.amount,
            TransactionType::Expense => slot.expense += tx.amount,
        }
    }

    for day in &mut days {
        day.net = day.income - day.expense;
    }

    CashflowCalendar {
        month_key: month,
        days,
    }
}
