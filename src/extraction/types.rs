// src/extraction/types.rs
use serde::{Deserialize, Serialize};

use crate::utils::collapse_whitespace;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Employer and title recovered from a job posting. Neither field is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub company: String,
    pub title: String,
}

impl JobInfo {
    /// Both sentinels, used whenever the page could not be fetched
    pub fn unknown() -> Self {
        Self {
            company: UNKNOWN_COMPANY.to_string(),
            title: UNKNOWN_POSITION.to_string(),
        }
    }

    /// Normalize raw candidates, substituting each sentinel independently
    pub fn from_candidates(company: Option<String>, title: Option<String>) -> Self {
        Self {
            company: normalize_or(company, UNKNOWN_COMPANY),
            title: normalize_or(title, UNKNOWN_POSITION),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.company == UNKNOWN_COMPANY && self.title == UNKNOWN_POSITION
    }
}

fn normalize_or(candidate: Option<String>, sentinel: &str) -> String {
    candidate
        .map(|value| collapse_whitespace(&value))
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| sentinel.to_string())
}
