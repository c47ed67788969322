//! Upcoming recurring transactions report

use chrono::NaiveDate;
use serde::Serialize;

use super::{csv_money, Report, ReportStyle, REPORT_WIDTH};
use crate::display::{double_separator, format_money_colored, separator, truncate};
use crate::error::{FinsightError, FinsightResult};
use crate::metrics::{upcoming_occurrences, Occurrence};
use crate::models::{Money, RecurringTransaction, TransactionKind};

#[derive(Debug, Clone, Serialize)]
pub struct RecurringReport {
    pub today: NaiveDate,
    pub horizon_days: u32,
    pub occurrences: Vec<Occurrence>,
    /// Scheduled income minus scheduled expenses over the horizon
    pub net: Money,
}

impl RecurringReport {
    pub fn generate(
        items: &[RecurringTransaction],
        today: NaiveDate,
        horizon_days: u32,
    ) -> FinsightResult<Self> {
        let occurrences = upcoming_occurrences(items, today, horizon_days)?;
        let net = Money::checked_sum(occurrences.iter().map(|o| match o.kind {
            TransactionKind::Income => o.amount,
            TransactionKind::Expense => -o.amount,
        }))
        .ok_or_else(|| FinsightError::amount_overflow("net scheduled amount"))?;

        Ok(Self {
            today,
            horizon_days,
            occurrences,
            net,
        })
    }
}

impl Report for RecurringReport {
    fn title(&self) -> String {
        format!("Upcoming: next {} days", self.horizon_days)
    }

    fn format_terminal(&self, style: &ReportStyle) -> String {
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if self.occurrences.is_empty() {
            output.push_str("Nothing scheduled.\n");
            return output;
        }

        for o in &self.occurrences {
            let sign = match o.kind {
                TransactionKind::Income => "+",
                TransactionKind::Expense => "-",
            };
            output.push_str(&format!(
                "{:<10} {:<24} {}{:>11}  {}\n",
                style.date(o.date),
                truncate(&o.description, 24),
                sign,
                style.money(o.amount),
                o.label
            ));
        }

        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Net scheduled: {}\n",
            format_money_colored(self.net, &style.currency_symbol)
        ));
        output
    }

    fn csv_header(&self) -> Vec<&'static str> {
        vec!["Date", "Description", "Type", "Amount", "Due"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.occurrences
            .iter()
            .map(|o| {
                vec![
                    o.date.to_string(),
                    o.description.clone(),
                    o.kind.to_string(),
                    csv_money(o.amount),
                    o.label.clone(),
                ]
            })
            .collect()
    }
}
