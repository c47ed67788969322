//! Derived metrics engine
//!
//! Pure, deterministic computations from a snapshot of records to
//! display-ready aggregates. Nothing in this module performs I/O, reads the
//! clock or keeps state between calls; every "now" or "today" is passed in.
//!
//! Every entry point validates its input first and returns
//! [`FinsightError::InvalidInput`] rather than computing with bad data.

pub mod budget;
pub mod goals;
pub mod habits;
pub mod health;
pub mod recurring;
pub mod spending;
pub mod totals;

pub use budget::{compute_budget_utilization, BudgetCategoryStatus, BudgetUtilization};
pub use goals::{compute_goal_progress, GoalProgress};
pub use habits::{toggle_habit_completion, StreakRule};
pub use health::{compute_health_score_inputs, HealthContext, HealthScoreInputs};
pub use recurring::{upcoming_occurrences, Occurrence};
pub use spending::{
    compute_recent_window_spending, compute_window_spending_with_top, CategorySpending,
    WindowSpending, DEFAULT_TOP_CATEGORIES, DEFAULT_WINDOW_DAYS,
};
pub use totals::{
    compute_financial_summary, compute_monthly_totals, compute_totals_for_period,
    FinancialSummary, MonthlyTotals,
};

use crate::error::{FinsightError, FinsightResult};
use crate::models::{BudgetCategory, FinancialGoal, Habit, RecurringTransaction, Transaction};

pub(crate) fn validate_transactions(transactions: &[Transaction]) -> FinsightResult<()> {
    for txn in transactions {
        txn.validate().map_err(|e| {
            tracing::warn!(id = %txn.id, error = %e, "rejected transaction");
            FinsightError::invalid("Transaction", txn.id.as_str(), e.to_string())
        })?;
    }
    Ok(())
}

pub(crate) fn validate_budget_categories(categories: &[BudgetCategory]) -> FinsightResult<()> {
    for category in categories {
        category.validate().map_err(|e| {
            tracing::warn!(id = %category.id, error = %e, "rejected budget category");
            FinsightError::invalid("Budget category", category.id.as_str(), e.to_string())
        })?;
    }
    Ok(())
}

/// Zero targets surface as `UndefinedRatio`, everything else as `InvalidInput`
pub(crate) fn validate_goal(goal: &FinancialGoal) -> FinsightResult<()> {
    use crate::models::GoalValidationError;

    goal.validate().map_err(|e| {
        tracing::warn!(id = %goal.id, error = %e, "rejected goal");
        match e {
            GoalValidationError::ZeroTarget => FinsightError::UndefinedRatio {
                entity_type: "Goal",
                identifier: goal.title.clone(),
                reason: "target amount is zero".into(),
            },
            other => FinsightError::invalid("Goal", goal.id.as_str(), other.to_string()),
        }
    })
}

pub(crate) fn validate_habit(habit: &Habit) -> FinsightResult<()> {
    habit.validate().map_err(|e| {
        tracing::warn!(id = %habit.id, error = %e, "rejected habit");
        FinsightError::invalid("Habit", habit.id.as_str(), e.to_string())
    })
}

pub(crate) fn validate_recurring(items: &[RecurringTransaction]) -> FinsightResult<()> {
    for item in items {
        item.validate().map_err(|e| {
            tracing::warn!(id = %item.id, error = %e, "rejected recurring transaction");
            FinsightError::invalid("Recurring transaction", item.id.as_str(), e.to_string())
        })?;
    }
    Ok(())
}
