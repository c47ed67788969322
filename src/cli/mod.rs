//! CLI command handlers
//!
//! Bridges clap argument parsing with the metrics engine and reports.

pub mod assistant;
pub mod config;
pub mod habit;
pub mod prompt;
pub mod report;

pub use assistant::{
    handle_categorize_command, handle_mood_command, parse_amount, CategorizeArgs, MoodArgs,
};
pub use config::{handle_config_command, ConfigArgs};
pub use habit::{handle_habit_command, HabitCommands};
pub use prompt::{handle_prompt_command, PromptArgs};
pub use report::{
    handle_budget_report, handle_goals_report, handle_habits_report, handle_health_report,
    handle_recurring_report, handle_spending_report, handle_summary_report, HealthArgs,
    OutputArgs, RecurringArgs, SpendingArgs, SummaryArgs,
};

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::{FinsightPaths, Settings};
use crate::error::{FinsightError, FinsightResult};
use crate::reports::ReportStyle;
use crate::storage::Snapshot;

/// Everything a command handler needs
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: FinsightPaths,
    pub settings: Settings,
    pub snapshot_path: PathBuf,
    /// Evaluation instant; the wall clock unless `--as-of` was given
    pub now: DateTime<Utc>,
}

impl CliContext {
    pub fn new(
        paths: FinsightPaths,
        settings: Settings,
        snapshot: Option<PathBuf>,
        as_of: Option<DateTime<Utc>>,
    ) -> Self {
        let snapshot_path = snapshot.unwrap_or_else(|| paths.snapshot_file());
        Self {
            paths,
            settings,
            snapshot_path,
            now: as_of.unwrap_or_else(Utc::now),
        }
    }

    /// Calendar day of `now` in UTC, whatever the local time zone
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn style(&self) -> ReportStyle {
        ReportStyle::from(&self.settings)
    }

    pub fn load_snapshot(&self) -> FinsightResult<Snapshot> {
        Snapshot::load(&self.snapshot_path)
    }
}

/// Generator that answers every prompt with a saved model reply
///
/// The file is read when the first prompt arrives, so a missing file
/// surfaces as a generation error.
pub fn saved_reply(path: PathBuf) -> impl Fn(&str) -> FinsightResult<String> {
    move |_: &str| {
        std::fs::read_to_string(&path)
            .map_err(|e| FinsightError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }
}

/// Parse `--as-of`: an RFC 3339 timestamp, or a date meaning the end of that UTC day
pub fn parse_as_of(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        format!(
            "invalid date '{}': use YYYY-MM-DD or an RFC 3339 timestamp",
            value
        )
    })?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| "invalid time of day".to_string())?;
    Ok(date.and_time(end_of_day).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use tempfile::TempDir;

    #[test]
    fn test_parse_as_of_date() {
        let parsed = parse_as_of("2025-03-12").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(parsed.hour(), 23);
    }

    #[test]
    fn test_parse_as_of_timestamp() {
        let parsed = parse_as_of("2025-03-12T08:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 12, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_as_of_rejects_garbage() {
        assert!(parse_as_of("last tuesday").is_err());
    }

    #[test]
    fn test_today_is_the_utc_day() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());
        let late_evening = parse_as_of("2025-03-15T23:30:00-05:00").unwrap();
        let ctx = CliContext::new(paths, Settings::default(), None, Some(late_evening));
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
    }

    #[test]
    fn test_saved_reply_reads_file_per_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reply.txt");
        std::fs::write(&path, "Utilities").unwrap();

        let generator = saved_reply(path.clone());
        assert_eq!(generator("first").unwrap(), "Utilities");
        assert_eq!(generator("second").unwrap(), "Utilities");

        std::fs::remove_file(&path).unwrap();
        let err = generator("third").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_context_defaults_snapshot_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());
        let ctx = CliContext::new(paths, Settings::default(), None, None);
        assert_eq!(ctx.snapshot_path, temp_dir.path().join("snapshot.json"));
    }
}
