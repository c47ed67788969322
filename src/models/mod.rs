//! Core data models for finsight
//!
//! This module contains the records the metrics engine reads: transactions,
//! budget categories, goals, habits and recurring transactions, as exported
//! by the document store.

pub mod budget;
pub mod goal;
pub mod habit;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::{BudgetCategory, BudgetValidationError};
pub use goal::{FinancialGoal, GoalCategory, GoalValidationError};
pub use habit::{Habit, HabitStatus, HabitValidationError, ProgressLevel, StreakTier};
pub use ids::{BudgetCategoryId, GoalId, HabitId, RecurringId, TransactionId};
pub use money::{Money, MoneyError};
pub use period::{Period, PeriodParseError};
pub use recurring::{DueLabel, Frequency, RecurringTransaction, RecurringValidationError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
