// src/bot/replies.rs
//! Chat reply texts. `*text*` renders bold in WhatsApp.

use crate::application::Receipt;
use crate::message::{FormatProblem, ParseFailure};
use crate::storage::ApplicationStats;
use crate::utils::format_us_date;

pub fn empty_message() -> String {
    "Please send a job posting URL or company/role information.".to_string()
}

pub fn help() -> String {
    r#"*Job Tracker Bot Help* 📝

Send me job information in these formats:

1️⃣ *Just a URL:*
   https://linkedin.com/jobs/view/123456

2️⃣ *URL with notes:*
   https://linkedin.com/jobs/view/123456
   Applied through referral

3️⃣ *Company and role:*
   Google - Software Engineer

4️⃣ *Company, role, and notes:*
   Apple - iOS Developer
   Remote position, 120k salary

Commands:
• *help* - Show this help
• *status* - Get summary of applications
• *sheet* - Get Google Sheet link"#
        .to_string()
}

pub fn status(stats: &ApplicationStats) -> String {
    let mut message = format!(
        "📊 *Application Summary*\n\n\
         📈 *Statistics:*\n\
         • Total Applications: *{}*\n\
         • This Week: *{}*\n\
         • This Month: *{}*\n\n\
         🕒 *Recent Applications:*",
        stats.total, stats.this_week, stats.this_month
    );

    if stats.recent.is_empty() {
        message.push_str("\nNone yet. Send a job link to get started!");
    }

    for entry in &stats.recent {
        message.push_str(&format!(
            "\n• {} - {} - {}",
            entry.date_label,
            entry.company,
            entry.role
        ));
    }

    message.push_str("\n\nSend \"sheet\" to get the Google Sheet link! 📊");
    message
}

pub fn status_error() -> String {
    "Error reading application data. Please check your storage configuration.".to_string()
}

pub fn sheet_link(url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            "📊 *Your Job Applications Google Sheet:*\n\n{}\n\nYou can view, edit, and share this sheet from anywhere!",
            url
        ),
        None => "No Google Sheet is configured for this tracker. Send \"status\" for a summary of your applications.".to_string(),
    }
}

pub fn confirmation(receipt: &Receipt) -> String {
    let notes = if receipt.notes.is_empty() {
        "None"
    } else {
        receipt.notes.as_str()
    };

    format!(
        "✅ *Job Application Tracked!*\n\n\
         *Company:* {}\n\
         *Role:* {}\n\
         *Date:* {}\n\
         *Notes:* {}\n\n\
         Added to your tracker! 📊\n\
         Send \"sheet\" to view it.",
        receipt.company,
        receipt.role,
        format_us_date(receipt.date_applied),
        notes
    )
}

pub fn format_guidance(failure: &ParseFailure) -> String {
    match failure.problem() {
        FormatProblem::EmptyField => {
            "Please use format: \"Company - Role\" or send a job URL.".to_string()
        }
        FormatProblem::MissingSeparator => "❓ I didn't understand that format.\n\n\
             Try:\n\
             • Job URL: https://linkedin.com/jobs/view/123\n\
             • Manual entry: Google - Software Engineer\n\
             • Send \"help\" for more options"
            .to_string(),
    }
}

pub fn storage_error() -> String {
    "❌ Sorry, I couldn't save that application. Please check your storage configuration and try again.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationRecord;
    use crate::storage::StatusEntry;
    use chrono::NaiveDate;

    #[test]
    fn test_confirmation_notes_default() {
        let receipt = Receipt {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            date_applied: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            notes: String::new(),
        };
        let text = confirmation(&receipt);
        assert!(text.contains("*Company:* Acme"));
        assert!(text.contains("*Role:* Engineer"));
        assert!(text.contains("*Date:* 07/04/2024"));
        assert!(text.contains("*Notes:* None"));
    }

    #[test]
    fn test_status_lists_recent() {
        let record = ApplicationRecord {
            date_applied: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_link: String::new(),
            notes: String::new(),
            applied_via: "WhatsApp Bot".to_string(),
            status: "Applied".to_string(),
        };
        let stats = ApplicationStats {
            total: 3,
            this_week: 1,
            this_month: 2,
            recent: vec![StatusEntry::from(&record)],
        };
        let text = status(&stats);
        assert!(text.contains("Total Applications: *3*"));
        assert!(text.contains("This Week: *1*"));
        assert!(text.contains("This Month: *2*"));
        assert!(text.contains("• 07/04/2024 - Acme - Engineer"));
    }

    #[test]
    fn test_guidance_depends_on_problem() {
        let missing = format_guidance(&ParseFailure::UnrecognizedFormat(
            FormatProblem::MissingSeparator,
        ));
        assert!(missing.contains("didn't understand"));

        let empty = format_guidance(&ParseFailure::UnrecognizedFormat(FormatProblem::EmptyField));
        assert!(empty.contains("Company - Role"));
    }

    #[test]
    fn test_sheet_link() {
        assert!(sheet_link(Some("https://docs.google.com/spreadsheets/d/x")).contains("/d/x"));
        assert!(sheet_link(None).contains("No Google Sheet"));
    }
}
