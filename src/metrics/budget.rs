//! Budget utilization
//!
//! Aggregates limits and spending across active budget categories. A zero
//! total budget yields 0% rather than an error.

use serde::Serialize;

use super::validate_budget_categories;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{BudgetCategory, BudgetCategoryId, Money};

/// Per-category budget status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetCategoryStatus {
    pub id: BudgetCategoryId,
    pub name: String,
    pub limit: Money,
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// spent / limit, unbounded above 1.0
    pub progress: f64,
    pub is_over_budget: bool,
}

impl BudgetCategoryStatus {
    fn from_category(category: &BudgetCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            limit: category.limit,
            spent: category.spent,
            remaining: category.remaining(),
            progress: category.spent.ratio_to(category.limit).unwrap_or(0.0),
            is_over_budget: category.is_over_budget(),
        }
    }
}

/// Budget totals across active categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUtilization {
    pub total_budget: Money,
    pub total_spent: Money,
    /// total_spent / total_budget * 100, or 0 when nothing is budgeted
    pub utilization_percent: f64,
    pub categories: Vec<BudgetCategoryStatus>,
}

impl BudgetUtilization {
    /// Number of categories spending past their limit
    pub fn over_budget_count(&self) -> usize {
        self.categories.iter().filter(|c| c.is_over_budget).count()
    }
}

/// Compute total budget, total spent and utilization percentage
///
/// Inactive categories are validated but left out of every total.
pub fn compute_budget_utilization(
    categories: &[BudgetCategory],
) -> FinsightResult<BudgetUtilization> {
    validate_budget_categories(categories)?;

    let active: Vec<&BudgetCategory> = categories.iter().filter(|c| c.is_active).collect();
    let total_budget = Money::checked_sum(active.iter().map(|c| c.limit))
        .ok_or_else(|| FinsightError::amount_overflow("total budget"))?;
    let total_spent = Money::checked_sum(active.iter().map(|c| c.spent))
        .ok_or_else(|| FinsightError::amount_overflow("total budget spending"))?;

    let utilization_percent = if total_budget.is_positive() {
        total_spent.cents() as f64 / total_budget.cents() as f64 * 100.0
    } else {
        0.0
    };

    Ok(BudgetUtilization {
        total_budget,
        total_spent,
        utilization_percent,
        categories: active
            .into_iter()
            .map(BudgetCategoryStatus::from_category)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(limit: i64, spent: i64) -> BudgetCategory {
        BudgetCategory::new(format!("cat-{}", limit), Money::from_dollars(limit))
            .with_spent(Money::from_dollars(spent))
    }

    #[test]
    fn test_utilization_with_overspent_category() {
        let categories = vec![category(500, 600), category(300, 100)];
        let report = compute_budget_utilization(&categories).unwrap();

        assert_eq!(report.total_budget, Money::from_dollars(800));
        assert_eq!(report.total_spent, Money::from_dollars(700));
        assert_eq!(report.utilization_percent, 87.5);
        assert_eq!(report.over_budget_count(), 1);

        let first = &report.categories[0];
        assert!(first.is_over_budget);
        assert_eq!(first.remaining, Money::from_dollars(-100));
        assert_eq!(first.progress, 1.2);
    }

    #[test]
    fn test_zero_total_budget_is_zero_percent() {
        let report = compute_budget_utilization(&[]).unwrap();
        assert!(report.total_budget.is_zero());
        assert_eq!(report.utilization_percent, 0.0);

        let mut inactive = category(200, 50);
        inactive.is_active = false;
        let report = compute_budget_utilization(&[inactive]).unwrap();
        assert_eq!(report.utilization_percent, 0.0);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn test_inactive_categories_are_excluded_from_totals() {
        let mut archived = category(1000, 900);
        archived.is_active = false;
        let categories = vec![category(400, 100), archived];

        let report = compute_budget_utilization(&categories).unwrap();
        assert_eq!(report.total_budget, Money::from_dollars(400));
        assert_eq!(report.total_spent, Money::from_dollars(100));
        assert_eq!(report.utilization_percent, 25.0);
        assert_eq!(report.categories.len(), 1);
    }

    #[test]
    fn test_utilization_matches_ratio() {
        let sets = vec![
            vec![category(100, 33)],
            vec![category(7, 3), category(11, 13)],
            vec![category(1234, 0), category(1, 1), category(99, 250)],
        ];
        for categories in sets {
            let report = compute_budget_utilization(&categories).unwrap();
            let expected = 100.0
                * (report.total_spent.cents() as f64 / report.total_budget.cents() as f64);
            assert_eq!(report.utilization_percent, expected);
        }
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let largest = Money::from_decimal(1e15).unwrap();
        let categories: Vec<BudgetCategory> = (0..100)
            .map(|i| BudgetCategory::new(format!("cat-{}", i), largest).with_spent(largest))
            .collect();

        let err = compute_budget_utilization(&categories).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("total budget"));
    }

    #[test]
    fn test_invalid_category_rejected() {
        let broken = BudgetCategory::new("Broken", Money::zero());
        let err = compute_budget_utilization(&[broken]).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
