//! Upcoming recurring transactions

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::validate_recurring;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Money, RecurringId, RecurringTransaction, TransactionKind};

/// One scheduled occurrence of a recurring transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub recurring_id: RecurringId,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    /// Human label relative to `today` ("Today", "In 3 days", ...)
    pub label: String,
}

/// List occurrences due from now through `today + horizon_days`, by date
///
/// An overdue `next_date` is listed once (labelled overdue); later
/// occurrences before `today` are skipped.
pub fn upcoming_occurrences(
    items: &[RecurringTransaction],
    today: NaiveDate,
    horizon_days: u32,
) -> FinsightResult<Vec<Occurrence>> {
    validate_recurring(items)?;

    let end = today
        .checked_add_signed(Duration::days(i64::from(horizon_days)))
        .ok_or_else(|| FinsightError::InvalidInput("horizon is out of range".into()))?;

    let mut occurrences = Vec::new();
    for item in items {
        let mut cursor = item.clone();
        let mut first = true;
        while cursor.next_date <= end {
            if first || cursor.next_date >= today {
                occurrences.push(Occurrence {
                    recurring_id: item.id.clone(),
                    description: item.description.clone(),
                    kind: item.kind,
                    amount: item.amount,
                    date: cursor.next_date,
                    label: cursor.due_label(today).to_string(),
                });
            }
            first = false;
            if cursor.advance().is_err() {
                break;
            }
        }
    }

    occurrences.sort_by_key(|o| o.date);
    Ok(occurrences)
}
