//! Recent spending report
//!
//! Expenses over a trailing window with the daily average and the top
//! categories by amount.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{csv_money, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_bar, format_percentage, separator, truncate};
use crate::error::FinsightResult;
use crate::metrics::{compute_window_spending_with_top, WindowSpending};
use crate::models::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    pub as_of: DateTime<Utc>,
    #[serde(flatten)]
    pub window: WindowSpending,
}

impl SpendingReport {
    pub fn generate(
        transactions: &[Transaction],
        now: DateTime<Utc>,
        window_days: u32,
        top_n: usize,
    ) -> FinsightResult<Self> {
        Ok(Self {
            as_of: now,
            window: compute_window_spending_with_top(transactions, now, window_days, top_n)?,
        })
    }
}

impl Report for SpendingReport {
    fn title(&self) -> String {
        format!("Spending: last {} days", self.window.window_days)
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let w = &self.window;
        let mut output = String::new();

        output.push_str(&format!(
            "{} ({} to {})\n",
            self.title(),
            style.date(w.since.date_naive()),
            style.date(self.as_of.date_naive())
        ));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>14}\n", "Total Spent", style.money(w.total_spent)));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "Daily Average",
            style.decimal(w.daily_average)
        ));

        output.push_str(&format!("\n{:<20} {:>14} {:>7}\n", "Category", "Amount", "%"));
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');

        if w.top_categories.is_empty() {
            output.push_str("No spending in this window.\n");
        }
        for category in &w.top_categories {
            output.push_str(&format!(
                "{:<20} {:>14} {:>7}  {}\n",
                truncate(&category.category, 20),
                style.money(category.amount),
                format_percentage(category.percentage),
                format_bar(category.percentage, 100.0, 16)
            ));
        }

        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Since", "Until", "Category", "Amount", "Percentage"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let since = self.window.since.to_rfc3339();
        let until = self.as_of.to_rfc3339();

        let mut rows: Vec<Vec<String>> = self
            .window
            .top_categories
            .iter()
            .map(|c| {
                vec![
                    since.clone(),
                    until.clone(),
                    c.category.clone(),
                    csv_money(c.amount),
                    format!("{:.2}", c.percentage),
                ]
            })
            .collect();

        rows.push(vec![
            since,
            until,
            "TOTAL".to_string(),
            csv_money(self.window.total_spent),
            String::new(),
        ]);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_window_report() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 18, 0, 0).unwrap();
        let transactions = vec![
            Transaction::expense(Money::from_dollars(120), "Food", now - Duration::days(2)),
            Transaction::expense(Money::from_dollars(60), "Fuel", now - Duration::days(10)),
            Transaction::expense(Money::from_dollars(500), "Old", now - Duration::days(45)),
        ];

        let report = SpendingReport::generate(&transactions, now, 30, 3).unwrap();
        assert_eq!(report.window.total_spent, Money::from_dollars(180));

        let text = report.format_terminal(&ReportStyle::default());
        assert!(text.contains("Spending: last 30 days"));
        assert!(text.contains("$6.00"));
        assert!(!text.contains("Old"));

        let rows = report.csv_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][2], "TOTAL");
        assert_eq!(rows[2][3], "180.00");
    }

    #[test]
    fn test_empty_window() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 18, 0, 0).unwrap();
        let report = SpendingReport::generate(&[], now, 7, 3).unwrap();
        assert!(report
            .format_terminal(&ReportStyle::default())
            .contains("No spending in this window."));
    }
}
