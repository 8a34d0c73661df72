// src/storage/sheets.rs
//! Google Sheets backend over the v4 REST API, authenticated as a service account.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};

use super::{ApplicationStore, StatusEntry};
use crate::app_log;
use crate::application::ApplicationRecord;
use crate::core::SheetsConfig;
use crate::utils::{parse_stored_date, ISO_DATE_FORMAT};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
const REQUEST_TIMEOUT_SECS: u64 = 30;

const HEADER_RANGE: &str = "A1:G1";
const DATA_RANGE: &str = "A2:G";

pub const HEADER_ROW: [&str; 7] = [
    "Date Applied",
    "Company",
    "Role/Position",
    "Job Link",
    "Status",
    "Notes",
    "Applied Via",
];

#[derive(Debug, Serialize)]
struct ServiceAccountClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct SheetsStore {
    client: Client,
    config: SheetsConfig,
    api_base: String,
    token_url: String,
    token: Mutex<Option<CachedToken>>,
    header_ready: OnceCell<()>,
}

impl SheetsStore {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        Self::with_endpoints(config, SHEETS_API_BASE, TOKEN_URL)
    }

    /// Point the store at alternative API and token endpoints
    pub fn with_endpoints(config: SheetsConfig, api_base: &str, token_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            api_base: api_base.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
            token: Mutex::new(None),
            header_ready: OnceCell::new(),
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{}", self.api_base, self.config.sheet_id, range)
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.request_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let now = Utc::now().timestamp();
        let claims = ServiceAccountClaims {
            iss: &self.config.service_account_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URL,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())
            .context("Invalid Google service account private key")?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("Failed to sign service account assertion")?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("Failed to request Google access token")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Token endpoint returned {}: {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        app_log!(debug, "Obtained Google access token for {}", self.config.service_account_email);

        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now()
                + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN),
        })
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to read range {}", range))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Sheets API returned {} reading {}: {}", status, range, body);
        }

        let range: ValueRange = response
            .json()
            .await
            .context("Failed to parse Sheets values response")?;
        Ok(range.values)
    }

    async fn write_header(&self) -> Result<()> {
        let token = self.access_token().await?;
        let response = self
            .client
            .put(self.values_url(HEADER_RANGE))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": [HEADER_ROW] }))
            .send()
            .await
            .context("Failed to write header row")?;

        if !response.status().is_success() {
            anyhow::bail!("Sheets API returned {} writing header row", response.status());
        }

        app_log!(info, "Initialized header row in sheet {}", self.config.sheet_id);
        Ok(())
    }

    /// Write the header row once per process if the sheet has none
    async fn ensure_header(&self) -> Result<()> {
        self.header_ready
            .get_or_try_init(|| async {
                let existing = self.read_range(HEADER_RANGE).await?;
                if existing.iter().all(|row| row.is_empty()) {
                    self.write_header().await?;
                }
                Ok::<(), anyhow::Error>(())
            })
            .await?;
        Ok(())
    }

    #[cfg(test)]
    async fn seed_token(&self, value: &str) {
        *self.token.lock().await = Some(CachedToken {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(600),
        });
    }
}

fn record_to_row(record: &ApplicationRecord) -> Vec<String> {
    vec![
        record.date_applied.format(ISO_DATE_FORMAT).to_string(),
        record.company.clone(),
        record.role.clone(),
        record.job_link.clone(),
        record.status.clone(),
        record.notes.clone(),
        record.applied_via.clone(),
    ]
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Rows edited by hand may be short or carry a US-style date; undated rows are skipped.
fn record_from_row(row: &[String]) -> Option<ApplicationRecord> {
    Some(ApplicationRecord {
        date_applied: parse_stored_date(&cell(row, 0))?,
        company: cell(row, 1),
        role: cell(row, 2),
        job_link: cell(row, 3),
        status: cell(row, 4),
        notes: cell(row, 5),
        applied_via: cell(row, 6),
    })
}

/// Undated rows keep their raw date text for the recent list
fn status_entry_from_row(row: &[String]) -> StatusEntry {
    match record_from_row(row) {
        Some(record) => StatusEntry::from(&record),
        None => StatusEntry::undated(&cell(row, 0), &cell(row, 1), &cell(row, 2)),
    }
}

#[async_trait]
impl ApplicationStore for SheetsStore {
    async fn append(&self, record: ApplicationRecord) -> Result<()> {
        self.ensure_header().await?;

        let token = self.access_token().await?;
        let url = format!("{}:append", self.values_url(HEADER_RANGE));
        let response = self
            .client
            .post(url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": [record_to_row(&record)] }))
            .send()
            .await
            .context("Failed to append row")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Sheets API returned {} appending row: {}", status, body);
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ApplicationRecord>> {
        self.ensure_header().await?;

        let rows = self.read_range(DATA_RANGE).await?;
        let total = rows.len();
        let records: Vec<ApplicationRecord> =
            rows.iter().filter_map(|row| record_from_row(row)).collect();

        if records.len() < total {
            app_log!(
                warn,
                "Skipped {} sheet rows without a readable date",
                total - records.len()
            );
        }

        Ok(records)
    }

    async fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        self.ensure_header().await?;

        let rows = self.read_range(DATA_RANGE).await?;
        Ok(rows.iter().map(|row| status_entry_from_row(row)).collect())
    }

    async fn health_check(&self) -> Result<()> {
        self.ensure_header().await
    }

    fn describe(&self) -> &'static str {
        "google-sheets"
    }

    fn sheet_url(&self) -> Option<String> {
        Some(self.config.sheet_url())
    }
}
