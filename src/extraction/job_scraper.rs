// src/extraction/job_scraper.rs
use anyhow::Result;
use scraper::Html;
use std::sync::Arc;

use super::fetcher::{HttpFetcher, PageFetcher};
use super::profiles::select_profile;
use super::types::JobInfo;
use crate::app_log;
use crate::core::config_manager::ScraperConfig;

pub struct JobScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl JobScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn with_http(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Fetch a posting and recover its company and title.
    ///
    /// Never fails: any fetch problem yields the sentinel `JobInfo` so a broken scrape cannot
    /// block the submission.
    pub async fn extract(&self, url: &str) -> JobInfo {
        app_log!(info, "Fetching job post: {}", url);

        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let info = extract_from_html(url, &html);
                if info.is_unknown() {
                    app_log!(warn, "No job details found on page {}", url);
                } else {
                    app_log!(info, "Extracted job: {} at {}", info.title, info.company);
                }
                info
            }
            Err(e) => {
                app_log!(warn, "Job page extraction degraded for {}: {}", url, e);
                JobInfo::unknown()
            }
        }
    }
}

/// Apply the profile selected by `url` to already-fetched markup
pub fn extract_from_html(url: &str, html: &str) -> JobInfo {
    let document = Html::parse_document(html);
    let profile = select_profile(url);
    app_log!(debug, "Using {} extraction profile for {}", profile.name, url);
    profile.extract(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fetcher::FetchError;
    use async_trait::async_trait;

    struct StaticPage(&'static str);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct NotFound;

    #[async_trait]
    impl PageFetcher for NotFound {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_sentinels() {
        let scraper = JobScraper::new(Arc::new(NotFound));
        let info = scraper.extract("https://www.linkedin.com/jobs/view/1").await;
        assert_eq!(info, JobInfo::unknown());
    }

    #[tokio::test]
    async fn test_generic_page() {
        let scraper = JobScraper::new(Arc::new(StaticPage(
            "<html><body><h1>Backend Engineer</h1></body></html>",
        )));
        let info = scraper.extract("https://careers.example.org/jobs/5").await;
        assert_eq!(info.title, "Backend Engineer");
        assert_eq!(info.company, "Unknown Company");
    }

    #[test]
    fn test_malformed_markup_still_total() {
        let info = extract_from_html("https://example.org", "<<<>>> not html </h1");
        assert_eq!(info, JobInfo::unknown());
    }
}
