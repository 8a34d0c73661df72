// src/bot/mod.rs
//! Per-message pipeline: classify, extract or parse, record, reply.

pub mod replies;

use chrono::Local;
use std::sync::Arc;

use crate::app_log;
use crate::application::{NewApplication, RecordBuilder, VIA_MANUAL, VIA_URL};
use crate::extraction::JobScraper;
use crate::message::{classify, parse_manual, tokenize, Intent};
use crate::storage::{ApplicationStats, ApplicationStore};

/// One inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub text: String,
    pub sender_id: String,
}

pub struct ConversationHandler {
    scraper: JobScraper,
    store: Arc<dyn ApplicationStore>,
}

impl ConversationHandler {
    pub fn new(scraper: JobScraper, store: Arc<dyn ApplicationStore>) -> Self {
        Self { scraper, store }
    }

    pub fn store(&self) -> &dyn ApplicationStore {
        self.store.as_ref()
    }

    /// Produce the single reply for `message`
    pub async fn handle(&self, message: &IncomingMessage) -> String {
        let text = message.text.trim();
        app_log!(info, "Received message from {}: {}", message.sender_id, text);

        if text.is_empty() {
            return replies::empty_message();
        }

        match classify(text) {
            Intent::Help => replies::help(),
            Intent::Status => self.status().await,
            Intent::SheetLink => replies::sheet_link(self.store.sheet_url().as_deref()),
            Intent::Submit => self.submit(text).await,
        }
    }

    async fn status(&self) -> String {
        match self.store.status_entries().await {
            Ok(entries) => {
                let stats = ApplicationStats::compute(&entries, Local::now().date_naive());
                replies::status(&stats)
            }
            Err(e) => {
                app_log!(error, "Failed to read applications: {:#}", e);
                replies::status_error()
            }
        }
    }

    async fn submit(&self, text: &str) -> String {
        let parsed = tokenize(text);

        let application = match parsed.urls.first() {
            Some(url) => {
                let info = self.scraper.extract(url).await;
                NewApplication {
                    company: info.company,
                    role: info.title,
                    job_link: url.clone(),
                    notes: parsed.residual_text,
                    applied_via: VIA_URL.to_string(),
                }
            }
            None => match parse_manual(text) {
                Ok(entry) => NewApplication {
                    company: entry.company,
                    role: entry.role,
                    job_link: String::new(),
                    notes: entry.notes,
                    applied_via: VIA_MANUAL.to_string(),
                },
                Err(failure) => {
                    app_log!(info, "Manual entry not recognized: {}", failure);
                    return replies::format_guidance(&failure);
                }
            },
        };

        match RecordBuilder::new(self.store.as_ref()).submit(application).await {
            Ok(receipt) => replies::confirmation(&receipt),
            Err(e) => {
                app_log!(error, "Failed to save application: {:#}", e);
                replies::storage_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationRecord;
    use crate::extraction::{FetchError, PageFetcher};
    use crate::storage::MemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;

    struct StaticPage(&'static str);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ApplicationStore for BrokenStore {
        async fn append(&self, _record: ApplicationRecord) -> Result<()> {
            anyhow::bail!("disk full")
        }

        async fn list_all(&self) -> Result<Vec<ApplicationRecord>> {
            anyhow::bail!("disk full")
        }

        fn describe(&self) -> &'static str {
            "broken"
        }
    }

    fn handler_with(store: Arc<dyn ApplicationStore>) -> ConversationHandler {
        let page = StaticPage(
            r#"<html><body><h1>Backend Engineer</h1><div class="company-name">Acme</div></body></html>"#,
        );
        ConversationHandler::new(JobScraper::new(Arc::new(page)), store)
    }

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage {
            text: text.to_string(),
            sender_id: "whatsapp:+15550001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_url_submission_records_scraped_fields() {
        let store = Arc::new(MemoryStore::new());
        let handler = handler_with(store.clone());

        let reply = handler
            .handle(&message("https://careers.acme.com/jobs/1\nApplied through referral"))
            .await;
        assert!(reply.contains("Job Application Tracked"));
        assert!(reply.contains("*Notes:* Applied through referral"));

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company, "Acme");
        assert_eq!(records[0].role, "Backend Engineer");
        assert_eq!(records[0].job_link, "https://careers.acme.com/jobs/1");
        assert_eq!(records[0].applied_via, "WhatsApp Bot");
    }

    #[tokio::test]
    async fn test_manual_submission() {
        let store = Arc::new(MemoryStore::new());
        let handler = handler_with(store.clone());

        let reply = handler
            .handle(&message("Google - Software Engineer\nReferral, remote"))
            .await;
        assert!(reply.contains("*Company:* Google"));

        let records = store.list_all().await.unwrap();
        assert_eq!(records[0].role, "Software Engineer");
        assert_eq!(records[0].notes, "Referral, remote");
        assert_eq!(records[0].job_link, "");
        assert_eq!(records[0].applied_via, "WhatsApp Bot (Manual)");
    }

    #[tokio::test]
    async fn test_unrecognized_manual_entry_is_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let handler = handler_with(store.clone());

        let reply = handler.handle(&message("just one line no separator")).await;
        assert!(reply.contains("didn't understand"));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commands() {
        let handler = handler_with(Arc::new(MemoryStore::new()));

        assert!(handler.handle(&message("HELP")).await.contains("Job Tracker Bot Help"));
        assert!(handler
            .handle(&message("status"))
            .await
            .contains("Total Applications: *0*"));
        assert!(handler
            .handle(&message("sheet"))
            .await
            .contains("No Google Sheet"));
        assert!(handler.handle(&message("   ")).await.contains("Please send"));
    }

    #[tokio::test]
    async fn test_status_counts_submissions() {
        let store = Arc::new(MemoryStore::new());
        let handler = handler_with(store.clone());

        handler.handle(&message("Acme - Engineer")).await;
        handler.handle(&message("Initech - Analyst")).await;

        let reply = handler.handle(&message("status")).await;
        assert!(reply.contains("Total Applications: *2*"));
        assert!(reply.contains("This Week: *2*"));
        let initech = reply.find("Initech").unwrap();
        let acme = reply.find("Acme").unwrap();
        assert!(initech < acme);
    }

    #[tokio::test]
    async fn test_storage_failure_is_apologized() {
        let handler = handler_with(Arc::new(BrokenStore));

        let reply = handler.handle(&message("Acme - Engineer")).await;
        assert!(reply.contains("couldn't save"));

        let status = handler.handle(&message("status")).await;
        assert!(status.contains("Error reading application data"));
    }
}
