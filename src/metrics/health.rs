//! Health score inputs
//!
//! The 0-100 health score itself is produced by a scoring backend (see
//! [`crate::scoring`]). This module only shapes and validates the numbers
//! handed to it. Ratios with nothing to divide by are `None`, never NaN.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{compute_budget_utilization, compute_goal_progress, compute_monthly_totals};
use crate::error::{FinsightError, FinsightResult};
use crate::models::{BudgetCategory, FinancialGoal, Money, Transaction};

/// Everything the health inputs are derived from
#[derive(Debug, Clone, Copy)]
pub struct HealthContext<'a> {
    pub transactions: &'a [Transaction],
    pub budget_categories: &'a [BudgetCategory],
    pub goals: &'a [FinancialGoal],
    pub now: DateTime<Utc>,
}

/// Numeric inputs for a health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreInputs {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// expenses / income; None without income
    pub spending_ratio: Option<f64>,
    /// (income - expenses) / income, negative when overspending; None without income
    pub savings_rate: Option<f64>,
    /// Share of active budget categories within their limit (0-1); None without categories
    pub budget_adherence: Option<f64>,
    /// Total spent / total budget * 100 (0 when nothing is budgeted)
    pub budget_utilization_percent: f64,
    /// Mean goal progress with each goal capped at 1.0 (0-1); None without goals
    pub goal_progress_average: Option<f64>,
}

impl HealthScoreInputs {
    /// Check that every present value is finite and inside its range
    pub fn validate(&self) -> FinsightResult<()> {
        let finite = |name: &str, value: Option<f64>| match value {
            Some(v) if !v.is_finite() => Err(FinsightError::InvalidInput(format!(
                "health input '{}' is not finite",
                name
            ))),
            _ => Ok(()),
        };
        let unit = |name: &str, value: Option<f64>| match value {
            Some(v) if !(0.0..=1.0).contains(&v) => Err(FinsightError::InvalidInput(format!(
                "health input '{}' must be between 0 and 1 (got {})",
                name, v
            ))),
            _ => Ok(()),
        };

        finite("spending_ratio", self.spending_ratio)?;
        finite("savings_rate", self.savings_rate)?;
        finite("budget_utilization_percent", Some(self.budget_utilization_percent))?;
        unit("budget_adherence", self.budget_adherence)?;
        unit("goal_progress_average", self.goal_progress_average)?;

        if let Some(ratio) = self.spending_ratio {
            if ratio < 0.0 {
                return Err(FinsightError::InvalidInput(
                    "health input 'spending_ratio' must not be negative".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Derive the health score inputs from a snapshot
pub fn compute_health_score_inputs(context: &HealthContext<'_>) -> FinsightResult<HealthScoreInputs> {
    let totals = compute_monthly_totals(context.transactions)?;
    let budget = compute_budget_utilization(context.budget_categories)?;

    let spending_ratio = totals.expenses.ratio_to(totals.income);
    let savings_rate = totals.net().ratio_to(totals.income);

    let budget_adherence = if budget.categories.is_empty() {
        None
    } else {
        let within = budget.categories.len() - budget.over_budget_count();
        Some(within as f64 / budget.categories.len() as f64)
    };

    let goal_progress_average = if context.goals.is_empty() {
        None
    } else {
        let mut sum = 0.0;
        for goal in context.goals {
            sum += compute_goal_progress(goal, context.now)?.progress.min(1.0);
        }
        Some(sum / context.goals.len() as f64)
    };

    let inputs = HealthScoreInputs {
        monthly_income: totals.income,
        monthly_expenses: totals.expenses,
        spending_ratio,
        savings_rate,
        budget_adherence,
        budget_utilization_percent: budget.utilization_percent,
        goal_progress_average,
    };
    inputs.validate()?;

    tracing::debug!(?inputs, "computed health score inputs");
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_full_context() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(4000), "Salary", now()),
            Transaction::expense(Money::from_dollars(3000), "Rent", now()),
        ];
        let budget = vec![
            BudgetCategory::new("Food", Money::from_dollars(500)).with_spent(Money::from_dollars(600)),
            BudgetCategory::new("Fun", Money::from_dollars(300)).with_spent(Money::from_dollars(100)),
        ];
        let goals = vec![
            FinancialGoal::new("A", Money::from_dollars(1000), now() + Duration::days(30))
                .with_current(Money::from_dollars(500)),
            FinancialGoal::new("B", Money::from_dollars(100), now() + Duration::days(30))
                .with_current(Money::from_dollars(300)),
        ];

        let inputs = compute_health_score_inputs(&HealthContext {
            transactions: &transactions,
            budget_categories: &budget,
            goals: &goals,
            now: now(),
        })
        .unwrap();

        assert_eq!(inputs.spending_ratio, Some(0.75));
        assert_eq!(inputs.savings_rate, Some(0.25));
        assert_eq!(inputs.budget_adherence, Some(0.5));
        assert_eq!(inputs.budget_utilization_percent, 87.5);
        // 0.5 and 3.0 capped to 1.0
        assert_eq!(inputs.goal_progress_average, Some(0.75));
    }

    #[test]
    fn test_empty_context_has_no_ratios() {
        let inputs = compute_health_score_inputs(&HealthContext {
            transactions: &[],
            budget_categories: &[],
            goals: &[],
            now: now(),
        })
        .unwrap();

        assert_eq!(inputs.spending_ratio, None);
        assert_eq!(inputs.savings_rate, None);
        assert_eq!(inputs.budget_adherence, None);
        assert_eq!(inputs.goal_progress_average, None);
        assert_eq!(inputs.budget_utilization_percent, 0.0);
    }

    #[test]
    fn test_overspending_gives_negative_savings_rate() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(1000), "Salary", now()),
            Transaction::expense(Money::from_dollars(1500), "Rent", now()),
        ];
        let inputs = compute_health_score_inputs(&HealthContext {
            transactions: &transactions,
            budget_categories: &[],
            goals: &[],
            now: now(),
        })
        .unwrap();
        assert_eq!(inputs.savings_rate, Some(-0.5));
        assert_eq!(inputs.spending_ratio, Some(1.5));
    }

    #[test]
    fn test_zero_target_goal_rejected() {
        let goals = vec![FinancialGoal::new("Zero", Money::zero(), now())];
        let err = compute_health_score_inputs(&HealthContext {
            transactions: &[],
            budget_categories: &[],
            goals: &goals,
            now: now(),
        })
        .unwrap_err();
        assert!(err.is_undefined_ratio());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let inputs = HealthScoreInputs {
            monthly_income: Money::zero(),
            monthly_expenses: Money::zero(),
            spending_ratio: Some(f64::NAN),
            savings_rate: None,
            budget_adherence: None,
            budget_utilization_percent: 0.0,
            goal_progress_average: None,
        };
        assert!(inputs.validate().unwrap_err().is_invalid_input());

        let out_of_range = HealthScoreInputs {
            spending_ratio: None,
            goal_progress_average: Some(1.5),
            ..inputs
        };
        assert!(out_of_range.validate().is_err());
    }
}
