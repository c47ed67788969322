//! Goal progress report

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{csv_money, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_bar, format_percentage, separator, truncate};
use crate::error::FinsightResult;
use crate::metrics::{compute_goal_progress, GoalProgress};
use crate::models::{FinancialGoal, GoalCategory, Money};

/// One goal with its raw amounts and derived progress
#[derive(Debug, Clone, Serialize)]
pub struct GoalRow {
    pub category: GoalCategory,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: DateTime<Utc>,
    #[serde(flatten)]
    pub progress: GoalProgress,
}

impl GoalRow {
    fn time_label(&self) -> String {
        let p = &self.progress;
        if p.is_achieved() {
            "Achieved".to_string()
        } else if p.is_overdue() {
            format!("Overdue by {} days", -p.days_remaining)
        } else if p.days_remaining == 1 {
            "1 day left".to_string()
        } else {
            format!("{} days left", p.days_remaining)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalsReport {
    pub as_of: DateTime<Utc>,
    pub goals: Vec<GoalRow>,
}

impl GoalsReport {
    /// Goals are listed by deadline, soonest first
    pub fn generate(goals: &[FinancialGoal], now: DateTime<Utc>) -> FinsightResult<Self> {
        let mut rows = goals
            .iter()
            .map(|goal| {
                Ok(GoalRow {
                    category: goal.category,
                    target_amount: goal.target_amount,
                    current_amount: goal.current_amount,
                    deadline: goal.deadline,
                    progress: compute_goal_progress(goal, now)?,
                })
            })
            .collect::<FinsightResult<Vec<_>>>()?;
        rows.sort_by_key(|row| row.deadline);

        Ok(Self { as_of: now, goals: rows })
    }
}

impl Report for GoalsReport {
    fn title(&self) -> String {
        "Financial Goals".to_string()
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if self.goals.is_empty() {
            output.push_str("No goals yet.\n");
            return output;
        }

        for row in &self.goals {
            let p = &row.progress;
            output.push_str(&format!(
                "{:<30} {}\n",
                truncate(&p.title, 30),
                row.time_label()
            ));
            output.push_str(&format!(
                "  {} / {}  {} {}\n",
                style.money(row.current_amount),
                style.money(row.target_amount),
                format_bar(p.progress, 1.0, 20),
                format_percentage(p.progress * 100.0)
            ));
            if p.remaining.is_positive() {
                output.push_str(&format!(
                    "  {} to go by {}\n",
                    style.money(p.remaining),
                    style.date(row.deadline.date_naive())
                ));
            }
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
        }

        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec![
            "Goal",
            "Category",
            "Target",
            "Current",
            "Remaining",
            "Progress",
            "Deadline",
            "Days Remaining",
        ]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.goals
            .iter()
            .map(|row| {
                let p = &row.progress;
                vec![
                    p.title.clone(),
                    row.category.to_string(),
                    csv_money(row.target_amount),
                    csv_money(row.current_amount),
                    csv_money(p.remaining),
                    format!("{:.4}", p.progress),
                    row.deadline.to_rfc3339(),
                    p.days_remaining.to_string(),
                ]
            })
            .collect()
    }
}
