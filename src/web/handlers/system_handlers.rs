// src/web/handlers/system_handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::web::types::{BotState, HealthResponse};

pub async fn health_handler(state: &State<BotState>) -> Json<HealthResponse> {
    let store = state.handler.store();

    let storage_healthy = match store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Storage health check failed: {:#}", e);
            false
        }
    };

    info!(
        "Health check: storage {} healthy={}",
        store.describe(),
        storage_healthy
    );

    Json(HealthResponse {
        status: "Bot is running!".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage: store.describe().to_string(),
        storage_healthy,
        google_sheet_id: if state.sheet_configured {
            "Configured".to_string()
        } else {
            "Not configured".to_string()
        },
    })
}
