//! Keyword-based category suggestions

use super::types::CategorySuggestion;
use crate::config::SuggestionConfig;
use crate::models::Transaction;
use crate::month::MonthKey;

/// Match the most recent transactions of `month` against the keyword rules.
///
/// A transaction matching several rules yields one suggestion per rule.
pub fn suggest_categories(
    records: &[Transaction],
    month: MonthKey,
    config: &SuggestionConfig,
) -> Vec<CategorySuggestion> {
    let range = month.range();
    let mut recent: Vec<&Transaction> = records
        .iter()
        .filter(|t| range.contains(t.date))
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(config.scan_limit);

    let mut suggestions = Vec::new();
    for tx in recent {
        let Some(description) = tx.description.as_deref().filter(|d| !d.is_empty()) else {
            continue;
        };
        let lowered = description.to_lowercase();
        for rule in config.rules.iter().filter(|r| r.matches(&lowered)) {
            suggestions.push(CategorySuggestion {
                transaction_id: tx.id,
                description: description.to_string(),
                suggested_category: rule.category.clone(),
            });
        }
    }

    suggestions.truncate(config.max_suggestions);
    suggestions
}
