//! Chat assistant REST endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;
use estately_chat::ChatbotReply;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub properties: Vec<PropertySummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertySummary {
    pub id: String,
    pub title: String,
}

impl From<ChatbotReply> for ChatResponse {
    fn from(reply: ChatbotReply) -> Self {
        Self {
            response: reply.response,
            properties: reply
                .properties
                .into_iter()
                .map(|summary| PropertySummary {
                    id: summary.id,
                    title: summary.title,
                })
                .collect(),
        }
    }
}

/// Create chat routes
pub fn create_chat_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat_with_bot))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply with any matched listings", body = ChatResponse)
    )
)]
pub async fn chat_with_bot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    // Always 200: search failures surface only as the reply text.
    let reply = state.chatbot.respond(&payload.message).await;
    Json(ChatResponse::from(reply))
}
