//! Recurring-payment detector
//!
//! Groups recent expenses by description and keeps groups that repeat with
//! a stable amount at a regular interval.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::types::RecurringPayment;
use crate::analytics::aggregate::days_before;
use crate::config::RecurringConfig;
use crate::models::Transaction;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Recurring payments among expenses dated within `[now - window, now]`.
///
/// Groups are keyed by trimmed, lowercased description; records without a
/// description are ignored. Results follow the order in which each group's
/// earliest payment occurred.
pub fn detect_recurring(
    records: &[Transaction],
    now: NaiveDateTime,
    config: &RecurringConfig,
) -> Vec<RecurringPayment> {
    let window_start = days_before(now, config.window_days);

    let mut expenses: Vec<&Transaction> = records
        .iter()
        .filter(|t| t.is_expense() && t.date >= window_start && t.date <= now)
        .collect();
    expenses.sort_by_key(|t| t.date);

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();
    for tx in expenses {
        let Some(key) = tx.description_text().map(str::to_lowercase) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(tx),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![tx]));
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, txs)| txs.len() >= config.min_occurrences.max(2))
        .filter_map(|(merchant, txs)| summarize(merchant, &txs, config))
        .take(config.max_results)
        .collect()
}

/// Summary of a date-ordered group, or `None` when it is not consistent
fn summarize(
    merchant: String,
    txs: &[&Transaction],
    config: &RecurringConfig,
) -> Option<RecurringPayment> {
    let first = txs.first()?;
    let last = txs.last()?;

    let count = txs.len() as f64;
    let avg_amount = txs.iter().map(|t| t.amount).sum::<f64>() / count;
    let max = txs.iter().map(|t| t.amount).fold(f64::MIN, f64::max);
    let min = txs.iter().map(|t| t.amount).fold(f64::MAX, f64::min);
    if avg_amount <= 0.0 || max - min > avg_amount * config.amount_tolerance {
        return None;
    }

    let intervals: Vec<f64> = txs
        .windows(2)
        .map(|pair| (pair[1].date - pair[0].date).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();
    let avg_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let regular = intervals
        .iter()
        .all(|gap| (gap - avg_interval).abs() <= config.interval_tolerance_days);
    if !regular {
        return None;
    }

    Some(RecurringPayment {
        merchant,
        avg_amount,
        frequency_days: avg_interval.round() as i64,
        last_payment: last.date,
        category: first.category.clone(),
    })
}
