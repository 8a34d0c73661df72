// src/storage/mod.rs
//! Append-only storage for application records

pub mod memory;
pub mod sheets;
pub mod sqlite;
pub mod stats;

pub use memory::MemoryStore;
pub use sheets::SheetsStore;
pub use sqlite::SqliteStore;
pub use stats::{ApplicationStats, StatusEntry};

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ApplicationRecord;
use crate::core::{StorageBackend, StorageConfig};

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Persist one record; the store takes ownership
    async fn append(&self, record: ApplicationRecord) -> Result<()>;

    /// Every record in insertion order
    async fn list_all(&self) -> Result<Vec<ApplicationRecord>>;

    /// Every stored row for the status summary, including rows `list_all`
    /// cannot turn into records
    async fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        let records = self.list_all().await?;
        Ok(records.iter().map(StatusEntry::from).collect())
    }

    /// Check the backend is reachable and initialized
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend name for logs and health output
    fn describe(&self) -> &'static str;

    /// Link the sender can open to browse their records
    fn sheet_url(&self) -> Option<String> {
        None
    }
}

/// Open the backend selected by configuration
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn ApplicationStore>> {
    let store: Arc<dyn ApplicationStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.database_path).await?),
        StorageBackend::Sheets => {
            let sheets = config.sheets.clone().ok_or_else(|| {
                anyhow::anyhow!("Sheets storage selected but Google credentials are missing")
            })?;
            Arc::new(SheetsStore::new(sheets)?)
        }
    };

    Ok(store)
}
