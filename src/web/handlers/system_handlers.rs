// src/web/handlers/system_handlers.rs
use crate::research::ResearchAgent;
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(agent: &State<ResearchAgent>) -> Json<TextResponse> {
    info!(
        "Health check ({} cached research results)",
        agent.cached_entries()
    );
    Json(TextResponse::success("OK".to_string(), None))
}
