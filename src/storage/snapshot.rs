//! Snapshot of all user records
//!
//! The metrics engine never talks to the document store. It reads a JSON
//! export with one array per collection; missing collections are empty.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::file_io::{read_json_required, write_json_atomic};
use crate::error::{FinsightError, FinsightResult};
use crate::metrics::{
    validate_budget_categories, validate_goal, validate_habit, validate_recurring,
    validate_transactions,
};
use crate::models::{
    BudgetCategory, FinancialGoal, Habit, RecurringTransaction, Transaction,
};

/// Every collection the engine reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budget_categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default, rename = "recurringTransactions", alias = "recurring")]
    pub recurring: Vec<RecurringTransaction>,
}

impl Snapshot {
    /// Load a snapshot file; it must exist
    pub fn load(path: impl AsRef<Path>) -> FinsightResult<Self> {
        let path = path.as_ref();
        let snapshot: Snapshot = read_json_required(path)?;
        tracing::debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            budget_categories = snapshot.budget_categories.len(),
            goals = snapshot.goals.len(),
            habits = snapshot.habits.len(),
            recurring = snapshot.recurring.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot back atomically
    pub fn save(&self, path: impl AsRef<Path>) -> FinsightResult<()> {
        write_json_atomic(path, self)
    }

    /// Validate every record, stopping at the first bad one
    pub fn validate(&self) -> FinsightResult<()> {
        validate_transactions(&self.transactions)?;
        validate_budget_categories(&self.budget_categories)?;
        for goal in &self.goals {
            validate_goal(goal)?;
        }
        for habit in &self.habits {
            validate_habit(habit)?;
        }
        validate_recurring(&self.recurring)?;
        Ok(())
    }

    /// Find a habit by id, or by case-insensitive name
    pub fn find_habit(&self, key: &str) -> FinsightResult<&Habit> {
        self.habits
            .iter()
            .find(|h| h.id.as_str() == key)
            .or_else(|| self.habits.iter().find(|h| h.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| FinsightError::habit_not_found(key))
    }

    /// Replace the habit with the same id
    pub fn replace_habit(&mut self, habit: Habit) -> FinsightResult<()> {
        let slot = self
            .habits
            .iter_mut()
            .find(|h| h.id == habit.id)
            .ok_or_else(|| FinsightError::habit_not_found(habit.id.as_str()))?;
        *slot = habit;
        Ok(())
    }
}
