// src/message/mod.rs
//! Interpretation of raw chat text: intent, URL tokens and manual "Company - Role" entries.

pub mod intent;
pub mod manual;
pub mod tokenizer;

pub use intent::{classify, Intent};
pub use manual::{parse_manual, FormatProblem, ManualEntry, ParseFailure};
pub use tokenizer::{tokenize, ParsedMessage};
