//! Budget category model
//!
//! A budget category has a spending limit and an accumulated spent amount.
//! Spending past the limit is a valid state, not an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetCategoryId;
use super::money::Money;

/// A budget category with a limit for the current budgeting cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    /// Unique identifier
    pub id: BudgetCategoryId,

    /// Display name
    pub name: String,

    /// Spending limit (positive)
    pub limit: Money,

    /// Amount spent so far (non-negative, may exceed the limit)
    #[serde(default)]
    pub spent: Money,

    /// Inactive categories are ignored by aggregates
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl BudgetCategory {
    /// Create a new active budget category with nothing spent
    pub fn new(name: impl Into<String>, limit: Money) -> Self {
        Self {
            id: BudgetCategoryId::new(),
            name: name.into(),
            limit,
            spent: Money::zero(),
            is_active: true,
        }
    }

    /// Set the spent amount
    pub fn with_spent(mut self, spent: Money) -> Self {
        self.spent = spent;
        self
    }

    /// Remaining budget (negative when over budget)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// Check if spending exceeds the limit
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }
        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent(self.spent));
        }
        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / {}", self.name, self.spent, self.limit)
    }
}

/// Validation errors for budget categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveLimit(Money),
    NegativeSpent(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget category name cannot be empty"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive (got {})", limit)
            }
            Self::NegativeSpent(spent) => {
                write!(f, "Spent amount must not be negative (got {})", spent)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_budget_is_valid() {
        let cat = BudgetCategory::new("Dining", Money::from_dollars(500))
            .with_spent(Money::from_dollars(600));
        assert!(cat.validate().is_ok());
        assert!(cat.is_over_budget());
        assert_eq!(cat.remaining(), Money::from_dollars(-100));
    }

    #[test]
    fn test_validation() {
        let zero = BudgetCategory::new("Zero", Money::zero());
        assert_eq!(
            zero.validate(),
            Err(BudgetValidationError::NonPositiveLimit(Money::zero()))
        );

        let negative = BudgetCategory::new("Neg", Money::from_dollars(10))
            .with_spent(Money::from_cents(-1));
        assert!(matches!(
            negative.validate(),
            Err(BudgetValidationError::NegativeSpent(_))
        ));

        let unnamed = BudgetCategory::new("  ", Money::from_dollars(10));
        assert_eq!(unnamed.validate(), Err(BudgetValidationError::EmptyName));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id": "b1", "name": "Groceries", "limit": 300}"#;
        let cat: BudgetCategory = serde_json::from_str(json).unwrap();
        assert!(cat.is_active);
        assert!(cat.spent.is_zero());
        assert_eq!(cat.limit, Money::from_dollars(300));
    }
}
