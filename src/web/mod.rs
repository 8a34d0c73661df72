// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Rocket, State};
use tracing::info;

use crate::bot::ConversationHandler;
use crate::core::ConfigManager;

#[post("/webhook", data = "<form>")]
pub async fn webhook(form: Form<WebhookForm>, state: &State<BotState>) -> TwimlResponse {
    handlers::webhook_handler(form.into_inner(), state).await
}

#[get("/health")]
pub async fn health(state: &State<BotState>) -> Json<HealthResponse> {
    handlers::health_handler(state).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format",
        "BAD_REQUEST",
        &["Post the webhook as application/x-www-form-urlencoded with Body and From fields"],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Not found",
        "NOT_FOUND",
        &["Available endpoints: POST /webhook, GET /health"],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    ))
}

/// Assemble the server without launching it
pub fn build_rocket(state: BotState, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .manage(state)
        .register("/", catchers![bad_request, not_found, internal_error])
        .mount("/", routes![webhook, health])
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager, handler: ConversationHandler) -> Result<()> {
    let port = config.server.port;
    let state = BotState {
        handler,
        sheet_configured: config.storage.sheets.is_some(),
    };

    info!("Starting job tracker bot on port {}", port);
    info!("Webhook URL: http://localhost:{}/webhook", port);

    build_rocket(state, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
