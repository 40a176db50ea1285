//! Explanation cards for month-over-month spending increases

use super::types::ExplanationCard;
use crate::analytics::aggregate::expense_totals_between;
use crate::config::ExplanationConfig;
use crate::models::Transaction;
use crate::month::MonthKey;

/// Categories whose expense grew against the previous month, largest
/// increase first
pub fn explain_increases(
    records: &[Transaction],
    month: MonthKey,
    config: &ExplanationConfig,
) -> Vec<ExplanationCard> {
    let current_range = month.range();
    let previous_range = month.previous().range();
    let current = expense_totals_between(records, current_range.start, current_range.end);
    let previous = expense_totals_between(records, previous_range.start, previous_range.end);

    let mut cards: Vec<ExplanationCard> = current
        .into_iter()
        .filter_map(|entry| {
            let previous_total = previous
                .iter()
                .find(|p| p.category_normalized == entry.category_normalized)
                .map(|p| p.total)
                .unwrap_or(0.0);
            let delta = entry.total - previous_total;
            (delta > 0.0).then(|| ExplanationCard {
                message: format!("{} drove most of the increase this month", entry.category),
                category: entry.category,
                delta,
                current: entry.total,
                previous: previous_total,
            })
        })
        .collect();

    cards.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    cards.truncate(config.top_n);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_increases_ranked() {
        let records = vec![
            expense(1, 100.0, "Dining", at(2024, 4, 3)),
            expense(2, 400.0, "Dining", at(2024, 5, 3)),
            expense(3, 50.0, "Taxi", at(2024, 5, 8)),
            expense(4, 300.0, "Rent", at(2024, 4, 1)),
            expense(5, 200.0, "Rent", at(2024, 5, 1)),
        ];
        let cards = explain_increases(&records, month_key("2024-05"), &ExplanationConfig::default());

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].category, "Dining");
        assert_eq!(cards[0].delta, 300.0);
        assert_eq!(cards[0].previous, 100.0);
        assert_eq!(
            cards[0].message,
            "Dining drove most of the increase this month"
        );
        assert_eq!(cards[1].category, "Taxi");
        assert_eq!(cards[1].previous, 0.0);
    }

    #[test]
    fn test_top_n() {
        let records: Vec<Transaction> = (1..=6)
            .map(|i| expense(i, i as f64 * 10.0, &format!("C{i}"), at(2024, 5, 2)))
            .collect();
        let cards = explain_increases(&records, month_key("2024-05"), &ExplanationConfig::default());
        let order: Vec<&str> = cards.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["C6", "C5", "C4", "C3"]);
    }
}
