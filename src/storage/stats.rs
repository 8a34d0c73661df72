// src/storage/stats.rs
use chrono::{Days, Months, NaiveDate};

use crate::application::ApplicationRecord;

const RECENT_LIMIT: usize = 5;

/// One stored row as the status summary sees it. Rows edited by hand in a
/// sheet may carry no readable date; they still count toward the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub date_applied: Option<NaiveDate>,
    /// Date as shown in the recent list
    pub date_label: String,
    pub company: String,
    pub role: String,
}

impl StatusEntry {
    pub fn undated(date_label: &str, company: &str, role: &str) -> Self {
        Self {
            date_applied: None,
            date_label: date_label.to_string(),
            company: company.to_string(),
            role: role.to_string(),
        }
    }
}

impl From<&ApplicationRecord> for StatusEntry {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            date_applied: Some(record.date_applied),
            date_label: record.display_date(),
            company: record.company.clone(),
            role: record.role.clone(),
        }
    }
}

/// Summary shown for the "status" command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationStats {
    pub total: usize,
    pub this_week: usize,
    pub this_month: usize,
    /// Most recently appended first
    pub recent: Vec<StatusEntry>,
}

impl ApplicationStats {
    /// A dated row counts when its midnight falls after "now minus a week" (or
    /// a month), so a row dated exactly one week or month ago is excluded.
    pub fn compute(entries: &[StatusEntry], today: NaiveDate) -> Self {
        let week_start = today.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN);
        let month_start = today
            .checked_sub_months(Months::new(1))
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .unwrap_or(NaiveDate::MIN);

        let since = |start: NaiveDate| {
            entries
                .iter()
                .filter(|entry| entry.date_applied.is_some_and(|date| date >= start))
                .count()
        };

        Self {
            total: entries.len(),
            this_week: since(week_start),
            this_month: since(month_start),
            recent: entries.iter().rev().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    pub fn from_records(records: &[ApplicationRecord], today: NaiveDate) -> Self {
        let entries: Vec<StatusEntry> = records.iter().map(StatusEntry::from).collect();
        Self::compute(&entries, today)
    }
}
