//! Reports module for finsight
//!
//! Each report wraps one metrics computation and knows how to render itself
//! for the terminal and as CSV rows. JSON and YAML exports serialize the
//! report directly.

pub mod budget;
pub mod goals;
pub mod habits;
pub mod health;
pub mod recurring;
pub mod spending;
pub mod summary;

pub use budget::BudgetReport;
pub use goals::GoalsReport;
pub use habits::{HabitRow, HabitsReport};
pub use health::HealthReport;
pub use recurring::RecurringReport;
pub use spending::SpendingReport;
pub use summary::SummaryReport;

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{FinsightError, FinsightResult};
use crate::models::Money;

/// Width of terminal report rules
pub const REPORT_WIDTH: usize = 64;

/// Formatting preferences applied to terminal output
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ReportStyle {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

impl ReportStyle {
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a fractional currency amount (averages)
    pub fn decimal(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, value.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, value)
        }
    }

    pub fn date(&self, date: chrono::NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

/// A rendered view over computed metrics
pub trait Report: Serialize {
    /// Human title, also used as the YAML header
    fn title(&self) -> String;

    /// Render for terminal display
    fn format_terminal(&self, style: &ReportStyle) -> String;

    /// Column names for CSV export
    fn csv_header(&self) -> Vec<&'static str>;

    /// One record per row for CSV export
    fn csv_rows(&self) -> Vec<Vec<String>>;
}

/// Export formats for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Write a report in the given format
pub fn export_report<R: Report, W: Write>(
    report: &R,
    format: ExportFormat,
    mut writer: W,
) -> FinsightResult<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            csv_writer.write_record(report.csv_header())?;
            for row in report.csv_rows() {
                csv_writer.write_record(&row)?;
            }
            csv_writer
                .flush()
                .map_err(|e| FinsightError::Export(e.to_string()))?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)
                .map_err(|e| FinsightError::Export(e.to_string()))?;
            writeln!(writer).map_err(|e| FinsightError::Export(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| FinsightError::Export(e.to_string()))?;
        }
        ExportFormat::Yaml => {
            writeln!(writer, "# finsight {}", report.title())
                .map_err(|e| FinsightError::Export(e.to_string()))?;
            serde_yaml::to_writer(&mut writer, report)?;
            writer
                .flush()
                .map_err(|e| FinsightError::Export(e.to_string()))?;
        }
    }
    Ok(())
}

/// Amount as a plain decimal for CSV cells
pub(crate) fn csv_money(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

/// Optional ratio as a CSV cell (empty when undefined)
pub(crate) fn csv_ratio(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{:.4}", v))
}
