//! Financial summary report
//!
//! Income, expenses, balance and the biggest expense categories, over all
//! loaded transactions or a single period.

use serde::Serialize;

use super::{csv_money, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{
    double_separator, format_bar, format_money_colored, format_percentage, separator, truncate,
};
use crate::error::FinsightResult;
use crate::metrics::{compute_financial_summary, FinancialSummary};
use crate::models::{Period, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Period label, when restricted to one
    pub period: Option<String>,
    pub transaction_count: usize,
    #[serde(flatten)]
    pub summary: FinancialSummary,
}

impl SummaryReport {
    pub fn generate(
        transactions: &[Transaction],
        period: Option<&Period>,
        top_n: usize,
    ) -> FinsightResult<Self> {
        crate::metrics::validate_transactions(transactions)?;

        let selected: Vec<Transaction> = match period {
            Some(p) => transactions
                .iter()
                .filter(|t| p.contains(t.date.date_naive()))
                .cloned()
                .collect(),
            None => transactions.to_vec(),
        };

        Ok(Self {
            period: period.map(|p| p.to_string()),
            transaction_count: selected.len(),
            summary: compute_financial_summary(&selected, top_n)?,
        })
    }
}

impl Report for SummaryReport {
    fn title(&self) -> String {
        match &self.period {
            Some(p) => format!("Financial Summary: {}", p),
            None => "Financial Summary".to_string(),
        }
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let s = &self.summary;
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>14}\n", "Income", style.money(s.total_income)));
        output.push_str(&format!("{:<20} {:>14}\n", "Expenses", style.money(s.total_expenses)));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "Balance",
            format_money_colored(s.balance, &style.currency_symbol)
        ));
        output.push_str(&format!("{:<20} {:>14}\n", "Transactions", self.transaction_count));

        if !s.top_categories.is_empty() {
            output.push_str("\nTop Categories\n");
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            for category in &s.top_categories {
                output.push_str(&format!(
                    "{:<20} {:>14} {:>7}  {}\n",
                    truncate(&category.category, 20),
                    style.money(category.amount),
                    format_percentage(category.percentage),
                    format_bar(category.percentage, 100.0, 16)
                ));
            }
        }

        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Period", "Row", "Category", "Amount", "Percentage"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let period = self.period.clone().unwrap_or_default();
        let s = &self.summary;
        let total = |row: &str, amount| {
            vec![
                period.clone(),
                row.to_string(),
                String::new(),
                csv_money(amount),
                String::new(),
            ]
        };

        let mut rows = vec![
            total("income", s.total_income),
            total("expenses", s.total_expenses),
            total("balance", s.balance),
        ];
        for category in &s.top_categories {
            rows.push(vec![
                period.clone(),
                "category".into(),
                category.category.clone(),
                csv_money(category.amount),
                format!("{:.2}", category.percentage),
            ]);
        }
        rows
    }
}
