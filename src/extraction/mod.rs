// src/extraction/mod.rs
//! Job page scraping: fetch a posting and recover `{company, title}` with per-site rules.

pub mod fetcher;
pub mod job_scraper;
pub mod profiles;
pub mod types;

pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use job_scraper::{extract_from_html, JobScraper};
pub use profiles::{select_profile, ExtractionRule, SiteProfile, GENERIC_PROFILE, SITE_PROFILES};
pub use types::{JobInfo, UNKNOWN_COMPANY, UNKNOWN_POSITION};
