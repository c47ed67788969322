//! Recurring transaction model
//!
//! A template for a transaction that repeats on a fixed frequency, tracked
//! by the calendar date of its next occurrence.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecurringId;
use super::money::Money;
use super::transaction::TransactionKind;

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    /// The occurrence after `date`
    ///
    /// Month and year steps clamp to the last day of shorter months
    /// (Jan 31 -> Feb 28/29).
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => date.checked_add_signed(Duration::days(1)),
            Self::Weekly => date.checked_add_signed(Duration::days(7)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// Human label for when a recurring transaction is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Overdue(i64),
    Today,
    Tomorrow,
    InDays(i64),
    On(NaiveDate),
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue(1) => write!(f, "Overdue by 1 day"),
            Self::Overdue(days) => write!(f, "Overdue by {} days", days),
            Self::Today => write!(f, "Today"),
            Self::Tomorrow => write!(f, "Tomorrow"),
            Self::InDays(days) => write!(f, "In {} days", days),
            Self::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// A recurring transaction template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: RecurringId,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub frequency: Frequency,
    pub next_date: NaiveDate,
}

impl RecurringTransaction {
    /// Create a new recurring transaction
    pub fn new(
        description: impl Into<String>,
        kind: TransactionKind,
        amount: Money,
        frequency: Frequency,
        next_date: NaiveDate,
    ) -> Self {
        Self {
            id: RecurringId::new(),
            description: description.into(),
            amount,
            category: String::new(),
            kind,
            frequency,
            next_date,
        }
    }

    /// Whole days from `today` until the next occurrence (negative if past)
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_date - today).num_days()
    }

    /// Label for the next occurrence relative to `today`
    pub fn due_label(&self, today: NaiveDate) -> DueLabel {
        match self.days_until(today) {
            days if days < 0 => DueLabel::Overdue(-days),
            0 => DueLabel::Today,
            1 => DueLabel::Tomorrow,
            days if days < 7 => DueLabel::InDays(days),
            _ => DueLabel::On(self.next_date),
        }
    }

    /// Move `next_date` forward by one period
    pub fn advance(&mut self) -> Result<(), RecurringValidationError> {
        self.next_date = self
            .frequency
            .next_after(self.next_date)
            .ok_or(RecurringValidationError::DateOverflow)?;
        Ok(())
    }

    /// Validate the recurring transaction
    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.amount.is_negative() {
            return Err(RecurringValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for recurring transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    NegativeAmount(Money),
    DateOverflow,
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Recurring amount must not be negative (got {})", amount)
            }
            Self::DateOverflow => write!(f, "Next occurrence is outside the supported date range"),
        }
    }
}

impl std::error::Error for RecurringValidationError {}
