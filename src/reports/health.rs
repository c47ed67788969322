//! Financial health report
//!
//! The inputs come from the metrics engine; the score comes from whichever
//! scorer the caller hands in.

use serde::Serialize;

use super::{csv_ratio, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_bar, format_percentage, format_ratio, separator};
use crate::error::FinsightResult;
use crate::metrics::{compute_health_score_inputs, HealthContext, HealthScoreInputs};
use crate::scoring::{HealthScore, HealthScorer};

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub scorer: String,
    pub inputs: HealthScoreInputs,
    #[serde(flatten)]
    pub score: HealthScore,
}

impl HealthReport {
    pub fn generate<S>(context: &HealthContext<'_>, scorer: &S) -> FinsightResult<Self>
    where
        S: HealthScorer + ?Sized,
    {
        let inputs = compute_health_score_inputs(context)?;
        let score = scorer.score_from_inputs(&inputs)?;
        tracing::info!(scorer = scorer.name(), score = score.score, "scored financial health");

        Ok(Self {
            scorer: scorer.name().to_string(),
            inputs,
            score,
        })
    }

    fn rating(&self) -> &'static str {
        match self.score.score {
            80..=100 => "Excellent",
            60..=79 => "Good",
            40..=59 => "Fair",
            _ => "Needs attention",
        }
    }
}

impl Report for HealthReport {
    fn title(&self) -> String {
        "Financial Health".to_string()
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let i = &self.inputs;
        let b = &self.score.breakdown;
        let mut output = String::new();

        output.push_str(&format!(
            "{}: {}/100 ({})\n",
            self.title(),
            self.score.score,
            self.rating()
        ));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        for (label, value) in [
            ("Spending", b.spending),
            ("Savings", b.savings),
            ("Budgeting", b.budgeting),
            ("Goals", b.goals),
        ] {
            output.push_str(&format!(
                "{:<12} {:>3}  {}\n",
                label,
                value,
                format_bar(f64::from(value), 100.0, 20)
            ));
        }

        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        let metrics = [
            ("Monthly income", style.money(i.monthly_income)),
            ("Monthly expenses", style.money(i.monthly_expenses)),
            ("Spending ratio", format_ratio(i.spending_ratio)),
            ("Savings rate", format_ratio(i.savings_rate)),
            (
                "Budget utilization",
                format_percentage(i.budget_utilization_percent),
            ),
            ("Budget adherence", format_ratio(i.budget_adherence)),
            ("Goal progress", format_ratio(i.goal_progress_average)),
        ];
        for (label, value) in metrics {
            output.push_str(&format!("{:<22} {:>12}\n", label, value));
        }

        if !self.score.recommendations.is_empty() {
            output.push_str("\nRecommendations\n");
            for rec in &self.score.recommendations {
                output.push_str(&format!("  - {}\n", rec));
            }
        }

        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Metric", "Value"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let i = &self.inputs;
        let b = &self.score.breakdown;
        let row = |metric: &str, value: String| vec![metric.to_string(), value];

        vec![
            row("score", self.score.score.to_string()),
            row("spending_score", b.spending.to_string()),
            row("savings_score", b.savings.to_string()),
            row("budgeting_score", b.budgeting.to_string()),
            row("goals_score", b.goals.to_string()),
            row("spending_ratio", csv_ratio(i.spending_ratio)),
            row("savings_rate", csv_ratio(i.savings_rate)),
            row("budget_adherence", csv_ratio(i.budget_adherence)),
            row(
                "budget_utilization_percent",
                format!("{:.2}", i.budget_utilization_percent),
            ),
            row("goal_progress_average", csv_ratio(i.goal_progress_average)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::scoring::HeuristicScorer;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_health_report_with_heuristic_scorer() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let transactions = vec![
            Transaction::income(Money::from_dollars(4000), "Salary", now),
            Transaction::expense(Money::from_dollars(3000), "Rent", now),
        ];
        let context = HealthContext {
            transactions: &transactions,
            budget_categories: &[],
            goals: &[],
            now,
        };

        let report = HealthReport::generate(&context, &HeuristicScorer::default()).unwrap();
        // spending 50, savings 100, budgeting and goals neutral 50
        assert_eq!(report.score.score, 63);
        assert_eq!(report.scorer, "heuristic");

        let text = report.format_terminal(&ReportStyle::default());
        assert!(text.contains("Financial Health: 63/100 (Good)"));
        assert!(text.contains("Savings rate"));
        assert!(text.contains("n/a"));

        let rows = report.csv_rows();
        assert_eq!(rows[0], vec!["score".to_string(), "63".to_string()]);
        assert_eq!(rows[7][1], "");
    }

    #[test]
    fn test_dyn_scorer() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
        let context = HealthContext {
            transactions: &[],
            budget_categories: &[],
            goals: &[],
            now,
        };
        let scorer: Box<dyn HealthScorer> = Box::new(HeuristicScorer::default());
        let report = HealthReport::generate(&context, scorer.as_ref()).unwrap();
        assert_eq!(report.score.score, 50);
    }
}
