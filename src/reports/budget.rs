//! Budget utilization report

use serde::Serialize;

use super::{csv_money, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_bar, format_percentage, separator, truncate};
use crate::error::FinsightResult;
use crate::metrics::{compute_budget_utilization, BudgetUtilization};
use crate::models::BudgetCategory;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    #[serde(flatten)]
    pub utilization: BudgetUtilization,
}

impl BudgetReport {
    pub fn generate(categories: &[BudgetCategory]) -> FinsightResult<Self> {
        Ok(Self {
            utilization: compute_budget_utilization(categories)?,
        })
    }
}

impl Report for BudgetReport {
    fn title(&self) -> String {
        "Budget Overview".to_string()
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let u = &self.utilization;
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>11} {:>11} {:>11}  {}\n",
            "Category", "Spent", "Limit", "Remaining", "Used"
        ));
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');

        for category in &u.categories {
            let marker = if category.is_over_budget { " OVER" } else { "" };
            output.push_str(&format!(
                "{:<18} {:>11} {:>11} {:>11}  {} {}{}\n",
                truncate(&category.name, 18),
                style.money(category.spent),
                style.money(category.limit),
                style.money(category.remaining),
                format_bar(category.progress, 1.0, 8),
                format_percentage(category.progress * 100.0),
                marker
            ));
        }

        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>11} {:>11}\n",
            "TOTAL",
            style.money(u.total_spent),
            style.money(u.total_budget)
        ));
        output.push_str(&format!(
            "Utilization: {}",
            format_percentage(u.utilization_percent)
        ));
        let over = u.over_budget_count();
        if over > 0 {
            output.push_str(&format!(" ({} over budget)", over));
        }
        output.push('\n');

        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Category", "Limit", "Spent", "Remaining", "Progress", "Over Budget"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let u = &self.utilization;
        let mut rows: Vec<Vec<String>> = u
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    csv_money(c.limit),
                    csv_money(c.spent),
                    csv_money(c.remaining),
                    format!("{:.4}", c.progress),
                    c.is_over_budget.to_string(),
                ]
            })
            .collect();

        rows.push(vec![
            "TOTAL".to_string(),
            csv_money(u.total_budget),
            csv_money(u.total_spent),
            csv_money(u.total_budget - u.total_spent),
            format!("{:.4}", u.utilization_percent / 100.0),
            (u.over_budget_count() > 0).to_string(),
        ]);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_budget_report() {
        let categories = vec![
            BudgetCategory::new("Food", Money::from_dollars(500)).with_spent(Money::from_dollars(600)),
            BudgetCategory::new("Fun", Money::from_dollars(300)).with_spent(Money::from_dollars(100)),
        ];
        let report = BudgetReport::generate(&categories).unwrap();

        let text = report.format_terminal(&ReportStyle::default());
        assert!(text.contains("Food"));
        assert!(text.contains("OVER"));
        assert!(text.contains("(1 over budget)"));
        assert!(text.contains("-$100.00"));

        let rows = report.csv_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][5], "true");
        assert_eq!(rows[2][1], "800.00");
        assert_eq!(rows[2][4], "0.8750");
    }
}
