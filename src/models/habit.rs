//! Habit model
//!
//! A habit is a daily financial practice with a streak of consecutive
//! completion days. The "completed" flag only means something relative to
//! the calendar day of `last_completed`; it lapses on its own when the day
//! changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::HabitId;

/// Completion status of a habit as seen on a particular day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    /// Completed on the given day
    CompletedToday,
    /// Touched on the given day (completed then undone) but not complete
    Pending,
    /// Not touched on the given day
    NotStarted,
}

impl HabitStatus {
    /// The two-state view: completed today, or not
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::CompletedToday)
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompletedToday => write!(f, "Completed today"),
            Self::Pending => write!(f, "Pending"),
            Self::NotStarted => write!(f, "Not started"),
        }
    }
}

/// Streak milestone bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Building,
    Steady,
    OnFire,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        if streak >= 7 {
            Self::OnFire
        } else if streak >= 3 {
            Self::Steady
        } else {
            Self::Building
        }
    }
}

impl fmt::Display for StreakTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building => write!(f, "building"),
            Self::Steady => write!(f, "steady"),
            Self::OnFire => write!(f, "on fire"),
        }
    }
}

/// How far a streak is toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressLevel {
    Behind,
    Fair,
    OnTrack,
}

impl ProgressLevel {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 0.8 {
            Self::OnTrack
        } else if ratio >= 0.5 {
            Self::Fair
        } else {
            Self::Behind
        }
    }
}

/// A daily financial habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Consecutive completion days
    #[serde(default)]
    pub streak: u32,
    /// Target streak length in days
    pub target: u32,
    /// Completed on the day of `last_completed`
    #[serde(default)]
    pub completed: bool,
    /// Calendar day of the last completion (None if never completed)
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
}

impl Habit {
    /// Create a new habit that has never been completed
    pub fn new(name: impl Into<String>, target: u32) -> Self {
        Self {
            id: HabitId::new(),
            name: name.into(),
            description: String::new(),
            streak: 0,
            target,
            completed: false,
            last_completed: None,
        }
    }

    /// Check whether the last completion falls on the given day
    pub fn touched_on(&self, day: NaiveDate) -> bool {
        self.last_completed == Some(day)
    }

    /// Check whether the habit counts as completed on the given day
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed && self.touched_on(day)
    }

    /// Status of the habit as seen on the given day
    pub fn status_on(&self, day: NaiveDate) -> HabitStatus {
        match (self.touched_on(day), self.completed) {
            (true, true) => HabitStatus::CompletedToday,
            (true, false) => HabitStatus::Pending,
            (false, _) => HabitStatus::NotStarted,
        }
    }

    /// Streak milestone band
    pub fn tier(&self) -> StreakTier {
        StreakTier::for_streak(self.streak)
    }

    /// Streak as a fraction of the target (unbounded above 1.0)
    pub fn progress(&self) -> f64 {
        if self.target == 0 {
            return 0.0;
        }
        self.streak as f64 / self.target as f64
    }

    /// Progress band for the streak
    pub fn progress_level(&self) -> ProgressLevel {
        ProgressLevel::for_ratio(self.progress())
    }

    /// Validate the habit
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        if self.target == 0 {
            return Err(HabitValidationError::ZeroTarget);
        }
        if self.completed && self.last_completed.is_none() {
            return Err(HabitValidationError::CompletedWithoutDate);
        }
        Ok(())
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{} days)", self.name, self.streak, self.target)
    }
}

/// Validation errors for habits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
    ZeroTarget,
    CompletedWithoutDate,
}

impl fmt::Display for HabitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Habit name cannot be empty"),
            Self::ZeroTarget => write!(f, "Habit target must be at least one day"),
            Self::CompletedWithoutDate => {
                write!(f, "Habit is marked completed but has no completion date")
            }
        }
    }
}

impl std::error::Error for HabitValidationError {}
