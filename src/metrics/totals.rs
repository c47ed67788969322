//! Income and expense totals
//!
//! Sums over whatever transactions the caller loaded. No month boundary is
//! applied unless the caller asks for one with a [`Period`].

use serde::Serialize;

use super::spending::{rank_categories, CategorySpending};
use super::validate_transactions;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Money, Period, Transaction, TransactionKind};

/// Income and expense sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyTotals {
    pub income: Money,
    pub expenses: Money,
}

impl MonthlyTotals {
    /// Income minus expenses (negative when spending exceeds income)
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }

    fn add(&mut self, txn: &Transaction) -> FinsightResult<()> {
        let (slot, what) = match txn.kind {
            TransactionKind::Income => (&mut self.income, "total income"),
            TransactionKind::Expense => (&mut self.expenses, "total expenses"),
        };
        *slot = slot
            .checked_add(txn.amount)
            .ok_or_else(|| FinsightError::amount_overflow(what))?;
        Ok(())
    }
}

/// Sum transaction amounts by kind
pub fn compute_monthly_totals(transactions: &[Transaction]) -> FinsightResult<MonthlyTotals> {
    validate_transactions(transactions)?;

    let mut totals = MonthlyTotals::default();
    for txn in transactions {
        totals.add(txn)?;
    }

    tracing::debug!(
        count = transactions.len(),
        income = %totals.income,
        expenses = %totals.expenses,
        "computed totals"
    );
    Ok(totals)
}

/// Sum transaction amounts by kind, restricted to a period (by UTC calendar date)
pub fn compute_totals_for_period(
    transactions: &[Transaction],
    period: &Period,
) -> FinsightResult<MonthlyTotals> {
    validate_transactions(transactions)?;

    let mut totals = MonthlyTotals::default();
    for txn in transactions
        .iter()
        .filter(|t| period.contains(t.date.date_naive()))
    {
        totals.add(txn)?;
    }
    Ok(totals)
}

/// Totals plus the biggest expense categories over the loaded transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses
    pub balance: Money,
    pub top_categories: Vec<CategorySpending>,
}

/// Build the dashboard summary
pub fn compute_financial_summary(
    transactions: &[Transaction],
    top_n: usize,
) -> FinsightResult<FinancialSummary> {
    let totals = compute_monthly_totals(transactions)?;
    let top_categories = rank_categories(
        transactions.iter().filter(|t| t.is_expense()),
        totals.expenses,
        top_n,
    )?;

    Ok(FinancialSummary {
        total_income: totals.income,
        total_expenses: totals.expenses,
        balance: totals.net(),
        top_categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_income_and_expense_totals() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(3000), "Salary", at(2025, 1, 1)),
            Transaction::expense(Money::from_dollars(1200), "Rent", at(2025, 1, 2)),
        ];

        let totals = compute_monthly_totals(&transactions).unwrap();
        assert_eq!(totals.income, Money::from_dollars(3000));
        assert_eq!(totals.expenses, Money::from_dollars(1200));
        assert_eq!(totals.net(), Money::from_dollars(1800));
    }

    #[test]
    fn test_totals_ignore_ordering() {
        let mut transactions = vec![
            Transaction::income(Money::from_cents(123_45), "Salary", at(2025, 1, 1)),
            Transaction::expense(Money::from_cents(10_01), "Food", at(2025, 1, 2)),
            Transaction::expense(Money::from_cents(99_99), "Fuel", at(2025, 1, 3)),
            Transaction::income(Money::from_cents(5_55), "Refund", at(2025, 1, 4)),
            Transaction::expense(Money::from_cents(0_10), "Fees", at(2025, 1, 5)),
        ];
        let forward = compute_monthly_totals(&transactions).unwrap();

        transactions.reverse();
        assert_eq!(compute_monthly_totals(&transactions).unwrap(), forward);

        transactions.rotate_left(2);
        assert_eq!(compute_monthly_totals(&transactions).unwrap(), forward);
    }

    #[test]
    fn test_net_may_be_negative() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(100), "Gift", at(2025, 1, 1)),
            Transaction::expense(Money::from_dollars(250), "Shopping", at(2025, 1, 2)),
        ];
        let totals = compute_monthly_totals(&transactions).unwrap();
        assert_eq!(totals.net(), Money::from_dollars(-150));
    }

    #[test]
    fn test_empty_input() {
        let totals = compute_monthly_totals(&[]).unwrap();
        assert!(totals.income.is_zero());
        assert!(totals.expenses.is_zero());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let transactions = vec![Transaction::expense(
            Money::from_cents(-500),
            "Food",
            at(2025, 1, 1),
        )];
        let err = compute_monthly_totals(&transactions).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_totals_overflow_is_rejected() {
        let largest = Money::from_decimal(1e15).unwrap();
        let transactions: Vec<Transaction> = (0..100)
            .map(|day| Transaction::expense(largest, "Property", at(2025, 1, 1 + day % 28)))
            .collect();

        let err = compute_monthly_totals(&transactions).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("total expenses"));

        let err = compute_financial_summary(&transactions, 3).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_largest_amounts_sum_below_overflow() {
        let largest = Money::from_decimal(1e15).unwrap();
        let transactions = vec![Transaction::income(largest, "Sale", at(2025, 1, 1)); 90];

        let totals = compute_monthly_totals(&transactions).unwrap();
        assert_eq!(totals.income.cents(), 90 * 10i64.pow(17));
        assert!(totals.expenses.is_zero());
    }

    #[test]
    fn test_period_filter() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(3000), "Salary", at(2025, 1, 31)),
            Transaction::income(Money::from_dollars(3000), "Salary", at(2025, 2, 28)),
            Transaction::expense(Money::from_dollars(40), "Food", at(2025, 2, 1)),
        ];

        let feb = compute_totals_for_period(&transactions, &Period::monthly(2025, 2)).unwrap();
        assert_eq!(feb.income, Money::from_dollars(3000));
        assert_eq!(feb.expenses, Money::from_dollars(40));

        let range = Period::custom(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        let jan = compute_totals_for_period(&transactions, &range).unwrap();
        assert_eq!(jan.income, Money::from_dollars(3000));
        assert!(jan.expenses.is_zero());
    }

    #[test]
    fn test_financial_summary() {
        let transactions = vec![
            Transaction::income(Money::from_dollars(2000), "Salary", at(2025, 1, 1)),
            Transaction::expense(Money::from_dollars(300), "Food", at(2025, 1, 2)),
            Transaction::expense(Money::from_dollars(100), "Fun", at(2025, 1, 3)),
        ];
        let summary = compute_financial_summary(&transactions, 3).unwrap();
        assert_eq!(summary.balance, Money::from_dollars(1600));
        assert_eq!(summary.top_categories.len(), 2);
        assert_eq!(summary.top_categories[0].category, "Food");
        assert_eq!(summary.top_categories[0].percentage, 75.0);
    }
}
