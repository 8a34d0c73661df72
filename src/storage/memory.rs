// src/storage/memory.rs
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ApplicationStore;
use crate::application::ApplicationRecord;

/// Process-local store; contents are lost on restart
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ApplicationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn append(&self, record: ApplicationRecord) -> Result<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ApplicationRecord>> {
        Ok(self.records.lock().await.clone())
    }

    fn describe(&self) -> &'static str {
        "memory"
    }
}
