// src/web/handlers/webhook_handlers.rs

use rocket::State;

use crate::bot::IncomingMessage;
use crate::web::types::{BotState, TwimlResponse, WebhookForm};

pub async fn webhook_handler(form: WebhookForm, state: &State<BotState>) -> TwimlResponse {
    let message = IncomingMessage {
        text: form.body.unwrap_or_default(),
        sender_id: form.from.unwrap_or_else(|| "unknown".to_string()),
    };

    let reply = state.handler.handle(&message).await;
    TwimlResponse::new(reply)
}
