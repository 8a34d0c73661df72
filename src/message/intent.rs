// src/message/intent.rs
use serde::Serialize;

/// What the sender is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Help,
    Status,
    SheetLink,
    Submit,
}

// Checked in order; the first keyword found decides.
const KEYWORDS: [(&str, Intent); 3] = [
    ("help", Intent::Help),
    ("status", Intent::Status),
    ("sheet", Intent::SheetLink),
];

/// Classify a raw message body. Anything without a command keyword is a submission.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Submit)
}
