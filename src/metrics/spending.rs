//! Trailing-window spending
//!
//! Expense totals over the last N days ending at an evaluation instant, with
//! a daily average and the biggest categories.
//!
//! Category ties are broken by first appearance: categories are grouped in
//! the order they are first seen in the input and then stably sorted by
//! amount, so of two equal sums the one encountered earlier ranks higher.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::validate_transactions;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Money, Transaction};

/// Default trailing window length
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Default number of top categories reported
pub const DEFAULT_TOP_CATEGORIES: usize = 3;

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: Money,
    /// Share of the total the ranking was computed against (0-100)
    pub percentage: f64,
}

/// Spending over a trailing window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSpending {
    pub window_days: u32,
    /// Earliest instant included in the window
    pub since: DateTime<Utc>,
    pub total_spent: Money,
    /// `total_spent / window_days` in currency units, unrounded
    pub daily_average: f64,
    pub top_categories: Vec<CategorySpending>,
}

/// Spending over the last `window_days` days with the top three categories
pub fn compute_recent_window_spending(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    window_days: u32,
) -> FinsightResult<WindowSpending> {
    compute_window_spending_with_top(transactions, now, window_days, DEFAULT_TOP_CATEGORIES)
}

/// Spending over the last `window_days` days with the top `top_n` categories
pub fn compute_window_spending_with_top(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    window_days: u32,
    top_n: usize,
) -> FinsightResult<WindowSpending> {
    if window_days == 0 {
        return Err(FinsightError::InvalidInput(
            "spending window must be at least one day".into(),
        ));
    }
    validate_transactions(transactions)?;

    let since = now
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .ok_or_else(|| {
            FinsightError::InvalidInput(format!(
                "spending window of {} days reaches outside the supported date range",
                window_days
            ))
        })?;

    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense() && t.date >= since)
        .collect();

    let total_spent = Money::checked_sum(in_window.iter().map(|t| t.amount))
        .ok_or_else(|| FinsightError::amount_overflow("window spending"))?;
    let daily_average = total_spent.to_decimal() / f64::from(window_days);
    let top_categories = rank_categories(in_window.into_iter(), total_spent, top_n)?;

    tracing::debug!(
        window_days,
        total = %total_spent,
        categories = top_categories.len(),
        "computed window spending"
    );

    Ok(WindowSpending {
        window_days,
        since,
        total_spent,
        daily_average,
        top_categories,
    })
}

/// Group amounts by category in first-seen order, rank descending, keep `top_n`
pub(crate) fn rank_categories<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    total: Money,
    top_n: usize,
) -> FinsightResult<Vec<CategorySpending>> {
    let mut order: Vec<(&'a str, Money)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for txn in transactions {
        let slot = *index.entry(txn.category.as_str()).or_insert_with(|| {
            order.push((txn.category.as_str(), Money::zero()));
            order.len() - 1
        });
        let (category, amount) = order[slot];
        order[slot].1 = amount.checked_add(txn.amount).ok_or_else(|| {
            FinsightError::amount_overflow(&format!("spending in category '{}'", category))
        })?;
    }

    // sort_by is stable: equal sums keep first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(order
        .into_iter()
        .take(top_n)
        .map(|(category, amount)| CategorySpending {
            category: category.to_string(),
            amount,
            percentage: amount.ratio_to(total).map(|r| r * 100.0).unwrap_or(0.0),
        })
        .collect())
}
