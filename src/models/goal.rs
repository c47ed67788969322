//! Financial goal model
//!
//! Goals track progress of a current amount toward a target by a deadline.
//! Over-achieving a goal and passing the deadline are both valid states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// What a goal is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    #[default]
    Savings,
    Debt,
    Investment,
    Other,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings"),
            Self::Debt => write!(f, "Debt"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: GoalId,
    pub title: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub is_completed: bool,
}

impl FinancialGoal {
    /// Create a new goal with nothing saved yet
    pub fn new(title: impl Into<String>, target_amount: Money, deadline: DateTime<Utc>) -> Self {
        Self {
            id: GoalId::new(),
            title: title.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline,
            category: GoalCategory::default(),
            is_completed: false,
        }
    }

    /// Set the current amount
    pub fn with_current(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Validate the goal
    ///
    /// A zero target is rejected here so that progress is always defined.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if self.target_amount.is_zero() {
            return Err(GoalValidationError::ZeroTarget);
        }
        if self.target_amount.is_negative() {
            return Err(GoalValidationError::NegativeTarget(self.target_amount));
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} / {}",
            self.title, self.category, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    ZeroTarget,
    NegativeTarget(Money),
    NegativeCurrent(Money),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::ZeroTarget => write!(f, "Goal target amount cannot be zero"),
            Self::NegativeTarget(amount) => {
                write!(f, "Goal target must be positive (got {})", amount)
            }
            Self::NegativeCurrent(amount) => {
                write!(f, "Goal current amount must not be negative (got {})", amount)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_over_achieved_goal_is_valid() {
        let goal = FinancialGoal::new("Emergency fund", Money::from_dollars(1000), deadline())
            .with_current(Money::from_dollars(1500));
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_zero_target_rejected() {
        let goal = FinancialGoal::new("Nothing", Money::zero(), deadline());
        assert_eq!(goal.validate(), Err(GoalValidationError::ZeroTarget));
    }

    #[test]
    fn test_document_store_format() {
        let json = r#"{
            "id": "g1",
            "title": "Pay off card",
            "targetAmount": 2500,
            "currentAmount": 400.25,
            "deadline": "2025-06-30T00:00:00Z",
            "category": "debt"
        }"#;
        let goal: FinancialGoal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.category, GoalCategory::Debt);
        assert_eq!(goal.current_amount, Money::from_cents(40025));
        assert!(!goal.is_completed);
    }
}
