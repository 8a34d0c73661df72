// src/message/manual.rs
use serde::Serialize;
use thiserror::Error;

const HYPHEN_SEPARATOR: &str = " - ";
const EN_DASH_SEPARATOR: &str = " \u{2013} ";

/// A "Company - Role" headline with optional notes on the following lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualEntry {
    pub company: String,
    pub role: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatProblem {
    /// Headline has neither " - " nor " – "
    MissingSeparator,
    /// Separator found but company or role is blank
    EmptyField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("unrecognized manual entry format ({0:?})")]
    UnrecognizedFormat(FormatProblem),
}

impl ParseFailure {
    pub fn problem(&self) -> FormatProblem {
        match self {
            ParseFailure::UnrecognizedFormat(problem) => *problem,
        }
    }
}

/// Parse a manual submission.
///
/// The hyphen separator is preferred whenever it occurs in the headline, even if an en dash
/// comes first. The headline is split once, at the first occurrence of the chosen separator.
pub fn parse_manual(text: &str) -> Result<ManualEntry, ParseFailure> {
    let mut lines = text.lines();
    let headline = lines.next().unwrap_or_default();
    let notes = lines.collect::<Vec<_>>().join(" ").trim().to_string();

    let separator = [HYPHEN_SEPARATOR, EN_DASH_SEPARATOR]
        .into_iter()
        .find(|separator| headline.contains(separator))
        .ok_or(ParseFailure::UnrecognizedFormat(FormatProblem::MissingSeparator))?;

    let (company, role) = headline
        .split_once(separator)
        .ok_or(ParseFailure::UnrecognizedFormat(FormatProblem::MissingSeparator))?;

    let (company, role) = (company.trim(), role.trim());
    if company.is_empty() || role.is_empty() {
        return Err(ParseFailure::UnrecognizedFormat(FormatProblem::EmptyField));
    }

    Ok(ManualEntry {
        company: company.to_string(),
        role: role.to_string(),
        notes,
    })
}
