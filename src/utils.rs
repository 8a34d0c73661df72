// src/utils.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Display format used in chat replies and legacy spreadsheet rows
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Persisted date format
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Collapse every whitespace run to a single space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a date as MM/DD/YYYY
pub fn format_us_date(date: NaiveDate) -> String {
    date.format(US_DATE_FORMAT).to_string()
}

/// Parse a stored date, accepting ISO-8601 first and MM/DD/YYYY for rows written by hand
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, US_DATE_FORMAT))
        .ok()
}

/// Escape text for inclusion in an XML element body
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Ensure directory exists
pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        crate::app_log!(info, "Created directory: {}", path.display());
    }
    Ok(())
}
