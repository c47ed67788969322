//! Habit completion toggling
//!
//! A habit is either completed for a given day or not. Toggling moves it
//! between the two:
//!
//! - completed today: undo, keeping the streak and `last_completed` as is
//! - completed earlier today and then undone: redo, keeping the streak
//!   (the day was already counted; a zero streak becomes 1)
//! - otherwise: a fresh completion. The streak grows by one when the
//!   previous completion was the day before under the configured
//!   [`StreakRule`], and restarts at 1 otherwise.
//!
//! Toggling twice on the same day therefore always returns the habit to its
//! previous completion state without moving the streak.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validate_habit;
use crate::error::FinsightResult;
use crate::models::Habit;

/// How "the previous completion was yesterday" is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StreakRule {
    /// True calendar-day difference of exactly one day
    #[default]
    CalendarDay,
    /// Day-of-month numbers differ by exactly one.
    ///
    /// Kept for parity with data produced by the mobile app: it never
    /// treats a month boundary as consecutive (31st -> 1st gives -30), so
    /// streaks reset on the first of every month.
    DayOfMonth,
}

impl StreakRule {
    /// Check whether `today` directly follows `previous`
    pub fn is_consecutive(&self, previous: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::CalendarDay => (today - previous).num_days() == 1,
            Self::DayOfMonth => i64::from(today.day()) - i64::from(previous.day()) == 1,
        }
    }
}

impl fmt::Display for StreakRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalendarDay => write!(f, "calendar-day"),
            Self::DayOfMonth => write!(f, "day-of-month"),
        }
    }
}

/// Toggle a habit's completion for `today`, returning the updated habit
pub fn toggle_habit_completion(
    habit: &Habit,
    today: NaiveDate,
    rule: StreakRule,
) -> FinsightResult<Habit> {
    validate_habit(habit)?;

    let mut next = habit.clone();
    if habit.is_completed_on(today) {
        next.completed = false;
    } else if habit.touched_on(today) {
        next.completed = true;
        next.streak = habit.streak.max(1);
    } else {
        let consecutive = habit
            .last_completed
            .map(|previous| rule.is_consecutive(previous, today))
            .unwrap_or(false);
        next.streak = if consecutive {
            habit.streak.saturating_add(1)
        } else {
            1
        };
        next.completed = true;
        next.last_completed = Some(today);
    }

    tracing::debug!(
        habit = %habit.id,
        from = %habit.status_on(today),
        to = %next.status_on(today),
        streak = next.streak,
        "toggled habit"
    );
    Ok(next)
}
