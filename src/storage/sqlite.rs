// src/storage/sqlite.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

use super::ApplicationStore;
use crate::app_log;
use crate::application::ApplicationRecord;
use crate::utils::ensure_dir_exists;

pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    date_applied: NaiveDate,
    company: String,
    role: String,
    job_link: String,
    notes: String,
    applied_via: String,
    status: String,
}

impl From<ApplicationRow> for ApplicationRecord {
    fn from(row: ApplicationRow) -> Self {
        Self {
            date_applied: row.date_applied,
            company: row.company,
            role: row.role,
            job_link: row.job_link,
            notes: row.notes,
            applied_via: row.applied_via,
            status: row.status,
        }
    }
}

impl SqliteStore {
    /// Open (creating if needed) the database file and run migrations
    pub async fn open(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir_exists(parent).await?;
            }
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        app_log!(
            info,
            "Database connection established: {}",
            database_path.display()
        );

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database, used by tests and throwaway runs
    pub async fn in_memory() -> Result<Self> {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS applications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date_applied TEXT NOT NULL,
                company TEXT NOT NULL,
                role TEXT NOT NULL,
                job_link TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                applied_via TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Applied',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create applications table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_applications_date ON applications(date_applied);",
        )
        .execute(&self.pool)
        .await?;

        app_log!(info, "Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for SqliteStore {
    async fn append(&self, record: ApplicationRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (date_applied, company, role, job_link, notes, applied_via, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.date_applied)
        .bind(&record.company)
        .bind(&record.role)
        .bind(&record.job_link)
        .bind(&record.notes)
        .bind(&record.applied_via)
        .bind(&record.status)
        .execute(&self.pool)
        .await
        .context("Failed to insert application")?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ApplicationRecord>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT date_applied, company, role, job_link, notes, applied_via, status
            FROM applications
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list applications")?;

        Ok(rows.into_iter().map(ApplicationRecord::from).collect())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "sqlite"
    }
}
