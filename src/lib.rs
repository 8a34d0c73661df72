//! WhatsApp job application tracker: turns chat messages into application records.

// Modules import `app_log` by path; the macro is defined after them.
pub mod application;
pub mod bot;
pub mod cli;
pub mod core;
pub mod environment;
pub mod extraction;
pub mod message;
pub mod storage;
pub mod utils;
pub mod web;

pub use application::{ApplicationRecord, NewApplication, RecordBuilder};
pub use bot::{ConversationHandler, IncomingMessage};
pub use extraction::{JobInfo, JobScraper};
pub use message::{classify, parse_manual, tokenize, Intent, ParsedMessage};
pub use storage::ApplicationStore;
pub use web::start_web_server;

/// Crate-wide logging entry point, forwards to the matching `tracing` macro.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

