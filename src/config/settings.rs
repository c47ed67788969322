//! User settings for finsight
//!
//! Reporting preferences and metric tuning: the spending window, how many
//! top categories to show, the habit streak rule and scorer weights.

use serde::{Deserialize, Serialize};

use super::paths::FinsightPaths;
use crate::error::{FinsightError, FinsightResult};
use crate::metrics::{StreakRule, DEFAULT_TOP_CATEGORIES, DEFAULT_WINDOW_DAYS};
use crate::scoring::ScoreWeights;
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Length of the recent spending window, in days
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// How many top categories reports show
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// How consecutive habit days are detected
    #[serde(default)]
    pub streak_rule: StreakRule,

    /// Days ahead listed by the recurring report
    #[serde(default = "default_recurring_horizon")]
    pub recurring_horizon_days: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Weights for the heuristic health scorer
    #[serde(default)]
    pub score_weights: ScoreWeights,
}

fn default_schema_version() -> u32 {
    1
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_top_categories() -> usize {
    DEFAULT_TOP_CATEGORIES
}

fn default_recurring_horizon() -> u32 {
    30
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            window_days: default_window_days(),
            top_categories: default_top_categories(),
            streak_rule: StreakRule::default(),
            recurring_horizon_days: default_recurring_horizon(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            score_weights: ScoreWeights::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults when the file doesn't exist
    pub fn load_or_create(paths: &FinsightPaths) -> FinsightResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller asks
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinsightError::Io(format!("Failed to read settings file: {}", e)))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinsightError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;

        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinsightPaths) -> FinsightResult<()> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject values no computation can use
    pub fn validate(&self) -> FinsightResult<()> {
        if self.window_days == 0 {
            return Err(FinsightError::Config("window_days must be at least 1".into()));
        }
        if self.top_categories == 0 {
            return Err(FinsightError::Config(
                "top_categories must be at least 1".into(),
            ));
        }
        self.score_weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.window_days, 30);
        assert_eq!(settings.top_categories, 3);
        assert_eq!(settings.streak_rule, StreakRule::CalendarDay);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());

        let settings = Settings {
            window_days: 14,
            streak_rule: StreakRule::DayOfMonth,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.window_days, 14);
        assert_eq!(loaded.streak_rule, StreakRule::DayOfMonth);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"streak_rule": "day_of_month"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.streak_rule, StreakRule::DayOfMonth);
        assert_eq!(loaded.window_days, 30);
    }

    #[test]
    fn test_zero_window_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), r#"{"window_days": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinsightError::Config(_)));
    }
}
