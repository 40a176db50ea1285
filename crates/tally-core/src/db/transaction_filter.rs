//! SQL translation of [`TransactionFilter`]

use crate::store::TransactionFilter;

use super::format_datetime;

/// Result of building a filter - contains SQL components and parameters
pub(crate) struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

/// Escape LIKE wildcards so the search term matches literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub(crate) fn build(filter: &TransactionFilter) -> FilterResult {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(tx_type) = filter.tx_type {
        conditions.push("tx_type = ?");
        params.push(Box::new(tx_type.as_str()));
    }

    if let Some(ref category) = filter.category {
        conditions.push("category_normalized = ?");
        params.push(Box::new(category.clone()));
    }

    if let Some(from) = filter.from {
        conditions.push("date >= ?");
        params.push(Box::new(format_datetime(&from)));
    }

    if let Some(to) = filter.to {
        conditions.push("date <= ?");
        params.push(Box::new(format_datetime(&to)));
    }

    if let Some(before) = filter.before {
        conditions.push("date < ?");
        params.push(Box::new(format_datetime(&before)));
    }

    if let Some(min) = filter.min_amount {
        conditions.push("amount >= ?");
        params.push(Box::new(min));
    }

    if let Some(max) = filter.max_amount {
        conditions.push("amount <= ?");
        params.push(Box::new(max));
    }

    if let Some(ref query) = filter.search {
        // LIKE is case-insensitive for ASCII in SQLite
        conditions.push("(description LIKE ? ESCAPE '\\' OR category LIKE ? ESCAPE '\\')");
        let pattern = like_pattern(query);
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    FilterResult {
        where_clause,
        params,
    }
}
