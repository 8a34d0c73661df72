// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::app_log;
use crate::bot::ConversationHandler;
use crate::core::ConfigManager;
use crate::extraction::JobScraper;
use crate::message::{classify, parse_manual, tokenize, Intent, ManualEntry, ParsedMessage};
use crate::storage::open_store;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "job-tracker")]
#[command(about = "Track job applications sent over WhatsApp")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the webhook server (default)
    Serve,
    /// Scrape a job posting and print the company and title
    Extract { url: String },
    /// Show how a message would be interpreted, without storing anything
    Parse { text: String },
}

#[derive(Serialize)]
struct Interpretation {
    intent: Intent,
    tokens: ParsedMessage,
    manual_entry: Option<ManualEntry>,
    manual_error: Option<String>,
}

fn interpret(text: &str) -> Interpretation {
    let (manual_entry, manual_error) = match parse_manual(text) {
        Ok(entry) => (Some(entry), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Interpretation {
        intent: classify(text),
        tokens: tokenize(text),
        manual_entry,
        manual_error,
    }
}

pub async fn run(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Extract { url } => {
            let scraper = JobScraper::with_http(&config.scraper)?;
            let info = scraper.extract(&url).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize job info")?
            );
            Ok(())
        }
        Command::Parse { text } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&interpret(&text))
                    .context("Failed to serialize interpretation")?
            );
            Ok(())
        }
    }
}

async fn serve(config: ConfigManager) -> Result<()> {
    config.ensure_directories().await?;

    let store = open_store(&config.storage).await?;
    // A storage problem at start-up is reported but does not stop the server
    match store.health_check().await {
        Ok(()) => app_log!(info, "✅ Storage ({}) connection successful", store.describe()),
        Err(e) => app_log!(error, "❌ Storage ({}) connection failed: {:#}", store.describe(), e),
    }

    if config.sheet_url().is_none() {
        app_log!(info, "Google Sheet not configured; the sheet command will say so");
    }

    let scraper = JobScraper::with_http(&config.scraper)?;
    let handler = ConversationHandler::new(scraper, store);
    start_web_server(&config, handler).await
}
