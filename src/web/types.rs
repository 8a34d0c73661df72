// src/web/types.rs

use rocket::form::FromForm;
use rocket::http::ContentType;
use rocket::response::{self, Responder};
use rocket::serde::Serialize;
use rocket::{Request, Response};
use std::io::Cursor;

use crate::bot::ConversationHandler;
use crate::utils::escape_xml;

/// Form fields posted by the messaging provider; extra fields are ignored
#[derive(Debug, FromForm)]
pub struct WebhookForm {
    #[field(name = "Body")]
    pub body: Option<String>,
    #[field(name = "From")]
    pub from: Option<String>,
}

/// TwiML reply carrying one message
pub struct TwimlResponse {
    pub message: String,
}

impl TwimlResponse {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
            escape_xml(&self.message)
        )
    }
}

impl<'r> Responder<'r, 'static> for TwimlResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = self.to_xml();
        Response::build()
            .header(ContentType::XML)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub storage: String,
    pub storage_healthy: bool,
    pub google_sheet_id: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: &str, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Server state shared by every request
pub struct BotState {
    pub handler: ConversationHandler,
    pub sheet_configured: bool,
}
