// src/message/tokenizer.rs
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::utils::collapse_whitespace;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// URLs found in a message plus whatever text surrounds them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    pub urls: Vec<String>,
    pub residual_text: String,
}

/// Split a message into its URLs (left to right) and the remaining text.
pub fn tokenize(text: &str) -> ParsedMessage {
    let urls = URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let without_urls = URL_PATTERN.replace_all(text, "");

    ParsedMessage {
        urls,
        residual_text: collapse_whitespace(&without_urls),
    }
}
