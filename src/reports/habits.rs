//! Habit streak report

use chrono::NaiveDate;
use serde::Serialize;

use super::{Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_bar, separator, truncate};
use crate::error::FinsightResult;
use crate::metrics::validate_habit;
use crate::models::{Habit, HabitId, HabitStatus, ProgressLevel, StreakTier};

/// Display state of one habit on a given day
#[derive(Debug, Clone, Serialize)]
pub struct HabitRow {
    pub id: HabitId,
    pub name: String,
    pub streak: u32,
    pub target: u32,
    pub status: HabitStatus,
    pub tier: StreakTier,
    /// streak / target
    pub progress: f64,
    pub level: ProgressLevel,
}

impl HabitRow {
    pub fn from_habit(habit: &Habit, today: NaiveDate) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            streak: habit.streak,
            target: habit.target,
            status: habit.status_on(today),
            tier: habit.tier(),
            progress: habit.progress(),
            level: habit.progress_level(),
        }
    }

    fn check_mark(&self) -> &'static str {
        match self.status {
            HabitStatus::CompletedToday => "[x]",
            HabitStatus::Pending => "[~]",
            HabitStatus::NotStarted => "[ ]",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitsReport {
    pub today: NaiveDate,
    pub habits: Vec<HabitRow>,
}

impl HabitsReport {
    pub fn generate(habits: &[Habit], today: NaiveDate) -> FinsightResult<Self> {
        for habit in habits {
            validate_habit(habit)?;
        }
        Ok(Self {
            today,
            habits: habits.iter().map(|h| HabitRow::from_habit(h, today)).collect(),
        })
    }

    pub fn completed_count(&self) -> usize {
        self.habits.iter().filter(|h| h.status.is_completed()).count()
    }
}

impl Report for HabitsReport {
    fn title(&self) -> String {
        "Financial Habits".to_string()
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} ({})\n", self.title(), style.date(self.today)));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if self.habits.is_empty() {
            output.push_str("No habits yet.\n");
            return output;
        }

        for row in &self.habits {
            output.push_str(&format!(
                "{} {:<26} {:>3}/{:<3} days  {} {}\n",
                row.check_mark(),
                truncate(&row.name, 26),
                row.streak,
                row.target,
                format_bar(row.progress, 1.0, 10),
                row.tier
            ));
        }

        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{} of {} done today\n",
            self.completed_count(),
            self.habits.len()
        ));
        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Id", "Habit", "Streak", "Target", "Status", "Tier", "Progress"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.habits
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.name.clone(),
                    row.streak.to_string(),
                    row.target.to_string(),
                    row.status.to_string(),
                    row.tier.to_string(),
                    format!("{:.4}", row.progress),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[test]
    fn test_habit_rows() {
        let mut done = Habit::new("No-spend day", 10);
        done.streak = 8;
        done.completed = true;
        done.last_completed = Some(today());

        let mut stale = Habit::new("Check balance", 30);
        stale.streak = 3;
        stale.completed = true;
        stale.last_completed = NaiveDate::from_ymd_opt(2025, 3, 11);

        let report = HabitsReport::generate(&[done, stale], today()).unwrap();
        assert_eq!(report.completed_count(), 1);
        assert_eq!(report.habits[0].tier, StreakTier::OnFire);
        assert_eq!(report.habits[0].level, ProgressLevel::OnTrack);
        assert_eq!(report.habits[1].status, HabitStatus::NotStarted);
        assert_eq!(report.habits[1].level, ProgressLevel::Behind);

        let text = report.format_terminal(&ReportStyle::default());
        assert!(text.contains("[x] No-spend day"));
        assert!(text.contains("1 of 2 done today"));
    }
}
