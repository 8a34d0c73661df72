// src/extraction/profiles.rs
//! Registry of per-site extraction rules.
//!
//! Each job board gets a [`SiteProfile`]: a host predicate plus ordered title and company rules.
//! Rules are tried in order and the first one producing non-empty text wins. Adding a board is a
//! matter of adding an entry to [`SITE_PROFILES`].

use scraper::{Html, Selector};
use url::Url;

use super::types::JobInfo;

/// One way of locating a piece of text in a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// Text of the first element matching the selector
    First(&'static str),
    /// Concatenated text of every element matching the selector
    All(&'static str),
    /// First segment of the document `<title>` split on the delimiter
    TitleSegment(char),
}

impl ExtractionRule {
    /// Returns the trimmed text this rule locates, or `None` when it finds nothing useful.
    pub fn evaluate(&self, document: &Html) -> Option<String> {
        let text = match self {
            ExtractionRule::First(selector) => {
                let selector = Selector::parse(selector).ok()?;
                let element = document.select(&selector).next()?;
                element.text().collect::<String>()
            }
            ExtractionRule::All(selector) => {
                let selector = Selector::parse(selector).ok()?;
                document
                    .select(&selector)
                    .flat_map(|element| element.text())
                    .collect::<String>()
            }
            ExtractionRule::TitleSegment(delimiter) => {
                let selector = Selector::parse("title").ok()?;
                let title = document
                    .select(&selector)
                    .next()?
                    .text()
                    .collect::<String>();
                title.split(*delimiter).next().unwrap_or_default().to_string()
            }
        };

        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Evaluate rules in order, stopping at the first hit
pub fn first_match(rules: &[ExtractionRule], document: &Html) -> Option<String> {
    rules.iter().find_map(|rule| rule.evaluate(document))
}

#[derive(Debug)]
pub struct SiteProfile {
    pub name: &'static str,
    /// Substrings of the URL host that select this profile
    pub hosts: &'static [&'static str],
    pub title_rules: &'static [ExtractionRule],
    pub company_rules: &'static [ExtractionRule],
}

impl SiteProfile {
    pub fn matches_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|pattern| host.contains(pattern))
    }

    pub fn extract(&self, document: &Html) -> JobInfo {
        JobInfo::from_candidates(
            first_match(self.company_rules, document),
            first_match(self.title_rules, document),
        )
    }
}

use ExtractionRule::{All, First, TitleSegment};

pub static SITE_PROFILES: &[SiteProfile] = &[
    SiteProfile {
        name: "linkedin",
        hosts: &["linkedin.com"],
        title_rules: &[First("h1")],
        company_rules: &[
            All(".topcard__org-name-link"),
            All(".job-details-jobs-unified-top-card__company-name"),
            All("[data-test-id=\"job-details-company-name\"]"),
        ],
    },
    SiteProfile {
        name: "indeed",
        hosts: &["indeed.com"],
        title_rules: &[
            All("[data-testid=\"jobsearch-JobInfoHeader-title\"]"),
            All("h1.jobsearch-JobInfoHeader-title"),
            First("h1"),
        ],
        company_rules: &[
            All("[data-testid=\"inlineHeader-companyName\"]"),
            All(".icl-u-lg-mr--sm"),
            All("[data-testid=\"company-name\"]"),
        ],
    },
    SiteProfile {
        name: "glassdoor",
        hosts: &["glassdoor.com"],
        title_rules: &[All("[data-test=\"job-title\"]"), First("h1")],
        company_rules: &[
            All("[data-test=\"employer-name\"]"),
            All("[data-test=\"employer-short-name\"]"),
        ],
    },
    SiteProfile {
        name: "lever",
        hosts: &["lever.co"],
        title_rules: &[All(".posting-headline h2"), First("h1")],
        company_rules: &[All(".main-header-text a"), All(".company-name")],
    },
    SiteProfile {
        name: "greenhouse",
        hosts: &["greenhouse.io", "greenhouge.io"],
        title_rules: &[All("#header h1"), First("h1")],
        company_rules: &[
            All("#header .company-name"),
            First("[data-mapped=\"true\"]"),
        ],
    },
];

pub static GENERIC_PROFILE: SiteProfile = SiteProfile {
    name: "generic",
    hosts: &[],
    title_rules: &[First("h1"), TitleSegment('|'), TitleSegment('-')],
    company_rules: &[
        First("[class*=\"company\"]"),
        First("[class*=\"employer\"]"),
        First("[class*=\"organization\"]"),
    ],
};

/// Pick the first profile whose host predicate matches, else the generic one.
pub fn select_profile(url: &str) -> &'static SiteProfile {
    let host = host_of(url);
    SITE_PROFILES
        .iter()
        .find(|profile| profile.matches_host(&host))
        .unwrap_or(&GENERIC_PROFILE)
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| url.to_lowercase())
}
