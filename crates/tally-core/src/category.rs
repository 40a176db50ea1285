//! Category label normalization
//!
//! Every place a category is stored or compared goes through
//! [`normalize_category`], so "Groceries", " groceries " and "GROCERIES"
//! land in the same bucket.

/// Grouping key for blank or missing categories
pub const UNCATEGORIZED: &str = "uncategorized";

/// Trim and lowercase a category label; blank input becomes `"uncategorized"`
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_lowercase(),
        _ => UNCATEGORIZED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(Some("Groceries")), "groceries");
        assert_eq!(normalize_category(Some("  Eating Out ")), "eating out");
        assert_eq!(normalize_category(Some("RENT")), "rent");
    }

    #[test]
    fn test_blank_category_is_uncategorized() {
        assert_eq!(normalize_category(None), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("")), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("   \t")), UNCATEGORIZED);
    }
}
