//! Goal progress
//!
//! Progress is unbounded above 1.0 and remaining amounts and days may go
//! negative: an over-achieved or overdue goal is a displayable state. A goal
//! with a zero target has no defined progress and is rejected.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validate_goal;
use crate::error::FinsightResult;
use crate::models::{FinancialGoal, GoalId, Money};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Derived progress of one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub id: GoalId,
    pub title: String,
    /// current / target
    pub progress: f64,
    /// target - current (negative once exceeded)
    pub remaining: Money,
    /// ceil((deadline - now) / 1 day), negative when overdue
    pub days_remaining: i64,
}

impl GoalProgress {
    pub fn is_achieved(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn is_overdue(&self) -> bool {
        self.days_remaining < 0 && !self.is_achieved()
    }
}

/// Compute progress, remaining amount and days left for a goal
pub fn compute_goal_progress(
    goal: &FinancialGoal,
    now: DateTime<Utc>,
) -> FinsightResult<GoalProgress> {
    validate_goal(goal)?;

    let progress = goal.current_amount.cents() as f64 / goal.target_amount.cents() as f64;
    let remaining = goal.target_amount - goal.current_amount;
    let millis = (goal.deadline - now).num_milliseconds();
    let days_remaining = (millis as f64 / MILLIS_PER_DAY).ceil() as i64;

    Ok(GoalProgress {
        id: goal.id.clone(),
        title: goal.title.clone(),
        progress,
        remaining,
        days_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_quarter_progress() {
        let goal = FinancialGoal::new("Laptop", Money::from_dollars(1000), now() + Duration::days(10))
            .with_current(Money::from_dollars(250));

        let progress = compute_goal_progress(&goal, now()).unwrap();
        assert_eq!(progress.progress, 0.25);
        assert_eq!(progress.remaining, Money::from_dollars(750));
        assert_eq!(progress.days_remaining, 10);
        assert!(!progress.is_achieved());
    }

    #[test]
    fn test_partial_days_round_up() {
        let goal = FinancialGoal::new(
            "Trip",
            Money::from_dollars(500),
            now() + Duration::days(3) + Duration::hours(2),
        );
        assert_eq!(compute_goal_progress(&goal, now()).unwrap().days_remaining, 4);
    }

    #[test]
    fn test_over_achieved_and_overdue() {
        let goal = FinancialGoal::new("Fund", Money::from_dollars(100), now() - Duration::days(5))
            .with_current(Money::from_dollars(150));

        let progress = compute_goal_progress(&goal, now()).unwrap();
        assert_eq!(progress.progress, 1.5);
        assert_eq!(progress.remaining, Money::from_dollars(-50));
        assert_eq!(progress.days_remaining, -5);
        assert!(progress.is_achieved());
        assert!(!progress.is_overdue());

        let behind = FinancialGoal::new("Car", Money::from_dollars(100), now() - Duration::days(2));
        assert!(compute_goal_progress(&behind, now()).unwrap().is_overdue());
    }

    #[test]
    fn test_zero_target_is_undefined() {
        let goal = FinancialGoal::new("Empty", Money::zero(), now());
        let err = compute_goal_progress(&goal, now()).unwrap_err();
        assert!(err.is_undefined_ratio());
    }

    #[test]
    fn test_negative_current_rejected() {
        let goal = FinancialGoal::new("Debt", Money::from_dollars(100), now())
            .with_current(Money::from_dollars(-1));
        assert!(compute_goal_progress(&goal, now()).unwrap_err().is_invalid_input());
    }
}
