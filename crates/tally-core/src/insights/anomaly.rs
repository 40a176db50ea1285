//! Anomaly detector: trailing week vs. the weekly average before it

use chrono::NaiveDateTime;

use super::types::Anomaly;
use crate::analytics::aggregate::{days_before, expense_totals_between};
use crate::config::AnomalyConfig;
use crate::models::Transaction;

/// Flag categories whose spend in `[now - window, now)` is at least
/// `ratio_threshold` times their weekly average over the preceding
/// `baseline_weeks` windows. Categories with no baseline are skipped.
///
/// Sorted by ratio, highest first.
pub fn detect_anomalies(
    records: &[Transaction],
    now: NaiveDateTime,
    config: &AnomalyConfig,
) -> Vec<Anomaly> {
    let week_start = days_before(now, config.window_days);
    let baseline_start = days_before(
        week_start,
        config.window_days.saturating_mul(config.baseline_weeks),
    );

    let current = expense_totals_between(records, week_start, now);
    let baseline = expense_totals_between(records, baseline_start, week_start);

    let mut anomalies: Vec<Anomaly> = current
        .into_iter()
        .filter_map(|entry| {
            let weekly_avg = baseline
                .iter()
                .find(|b| b.category_normalized == entry.category_normalized)
                .map(|b| b.total / config.baseline_weeks as f64)
                .filter(|avg| *avg > 0.0)?;
            let ratio = entry.total / weekly_avg;
            if ratio < config.ratio_threshold {
                return None;
            }
            Some(Anomaly {
                message: format!(
                    "{} spending is {:.1}× higher than your weekly average",
                    entry.category, ratio
                ),
                category: entry.category,
                current: entry.total,
                baseline: weekly_avg,
                ratio,
            })
        })
        .collect();

    anomalies.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    anomalies
}
