// src/application.rs
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::app_log;
use crate::storage::ApplicationStore;
use crate::utils::format_us_date;

pub const STATUS_APPLIED: &str = "Applied";
pub const VIA_URL: &str = "WhatsApp Bot";
pub const VIA_MANUAL: &str = "WhatsApp Bot (Manual)";

/// One tracked job application, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub date_applied: NaiveDate,
    pub company: String,
    pub role: String,
    pub job_link: String,
    pub notes: String,
    pub applied_via: String,
    pub status: String,
}

impl ApplicationRecord {
    pub fn display_date(&self) -> String {
        format_us_date(self.date_applied)
    }
}

/// Fields gathered from a submission before the record exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub job_link: String,
    pub notes: String,
    pub applied_via: String,
}

/// What the sender is told after a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub company: String,
    pub role: String,
    pub date_applied: NaiveDate,
    pub notes: String,
}

impl From<&ApplicationRecord> for Receipt {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            company: record.company.clone(),
            role: record.role.clone(),
            date_applied: record.date_applied,
            notes: record.notes.clone(),
        }
    }
}

pub struct RecordBuilder<'a> {
    store: &'a dyn ApplicationStore,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(store: &'a dyn ApplicationStore) -> Self {
        Self { store }
    }

    /// Assemble a record dated `today` with status "Applied"
    pub fn build(application: NewApplication, today: NaiveDate) -> ApplicationRecord {
        ApplicationRecord {
            date_applied: today,
            company: application.company,
            role: application.role,
            job_link: application.job_link,
            notes: application.notes,
            applied_via: application.applied_via,
            status: STATUS_APPLIED.to_string(),
        }
    }

    /// Build a record dated today and hand it to the store. A failed write is returned, not retried.
    pub async fn submit(&self, application: NewApplication) -> Result<Receipt> {
        self.submit_on(application, Local::now().date_naive()).await
    }

    pub async fn submit_on(&self, application: NewApplication, today: NaiveDate) -> Result<Receipt> {
        let record = Self::build(application, today);
        let receipt = Receipt::from(&record);

        self.store.append(record).await?;
        app_log!(
            info,
            "Tracked application: {} - {} ({})",
            receipt.company,
            receipt.role,
            self.store.describe()
        );

        Ok(receipt)
    }
}
