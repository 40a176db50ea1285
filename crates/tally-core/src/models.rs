//! Domain models for Tally

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::normalize_category;
use crate::error::{Error, Result};
use crate::month::MonthKey;

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense.
///
/// Transactions are replaced wholesale on edit; `category_normalized` is
/// always derived from `category` when one is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub category_normalized: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Description trimmed, or `None` when blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }
}

/// A transaction that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// Defaults to the creation time when omitted
    pub date: Option<NaiveDateTime>,
    /// Set by importers for deduplication
    pub import_hash: Option<String>,
}

impl NewTransaction {
    pub fn new(tx_type: TransactionType, amount: f64, category: impl Into<String>) -> Self {
        Self {
            tx_type,
            amount,
            category: category.into(),
            description: None,
            date: None,
            import_hash: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)
    }

    /// Materialize with a store-assigned id; `now` fills a missing date
    pub fn into_transaction(self, id: i64, now: NaiveDateTime) -> Transaction {
        let category = self.category.trim().to_string();
        Transaction {
            id,
            tx_type: self.tx_type,
            amount: self.amount,
            category_normalized: normalize_category(Some(&category)),
            category,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date: self.date.unwrap_or(now),
        }
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub category_normalized: String,
    pub amount: f64,
    pub month_key: MonthKey,
}

/// A budget that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub month_key: MonthKey,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, amount: f64, month_key: MonthKey) -> Self {
        Self {
            category: category.into(),
            amount,
            month_key,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)
    }

    pub fn category_normalized(&self) -> String {
        normalize_category(Some(&self.category))
    }

    pub fn into_budget(self, id: i64) -> Budget {
        let category = self.category.trim().to_string();
        Budget {
            id,
            category_normalized: normalize_category(Some(&category)),
            category,
            amount: self.amount,
            month_key: self.month_key,
        }
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            "Income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_new_transaction_normalizes_category() {
        let tx = NewTransaction::new(TransactionType::Expense, 12.5, "  Groceries ")
            .with_description("  corner shop ")
            .into_transaction(7, now());
        assert_eq!(tx.id, 7);
        assert_eq!(tx.category, "Groceries");
        assert_eq!(tx.category_normalized, "groceries");
        assert_eq!(tx.description.as_deref(), Some("corner shop"));
        assert_eq!(tx.date, now());
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let tx = NewTransaction::new(TransactionType::Expense, 1.0, "Misc")
            .with_description("   ")
            .into_transaction(1, now());
        assert!(tx.description.is_none());
        assert!(tx.description_text().is_none());
    }

    #[test]
    fn test_amount_validation() {
        assert!(NewTransaction::new(TransactionType::Income, 0.0, "Salary")
            .validate()
            .is_ok());
        assert!(NewTransaction::new(TransactionType::Income, -1.0, "Salary")
            .validate()
            .is_err());
        let month: MonthKey = "2024-06".parse().unwrap();
        assert!(NewBudget::new("Rent", f64::NAN, month).validate().is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = NewTransaction::new(TransactionType::Expense, 3.0, "Coffee")
            .into_transaction(1, now());
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["categoryNormalized"], "coffee");
    }
}
