//! Transaction model
//!
//! A transaction is a non-negative amount whose direction is carried by its
//! kind (income or expense), never by the sign of the number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount (always non-negative)
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Free-text category label
    #[serde(default)]
    pub category: String,

    /// Description/notes
    #[serde(default)]
    pub description: String,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    /// Optional tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Transaction {
    /// Create a new transaction with a fresh ID
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            kind,
            category: category.into(),
            description: String::new(),
            date,
            tags: Vec::new(),
        }
    }

    /// Create an income transaction
    pub fn income(amount: Money, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Income, amount, category, date)
    }

    /// Create an expense transaction
    pub fn expense(amount: Money, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Expense, amount, category, date)
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.id.is_blank() {
            return Err(TransactionValidationError::MissingId);
        }
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.category,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingId,
    NegativeAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "Transaction is missing an id"),
            Self::NegativeAmount(amount) => write!(
                f,
                "Transaction amount must not be negative (got {}); use the type to mark expenses",
                amount
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
