use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::{resolve_caller, AppState};

#[derive(Debug, Deserialize)]
pub struct ConversationBody {
    pub creator_id: String,
}

pub async fn find_or_create(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(body): Json<ConversationBody>,
) -> Response {
    let caller = resolve_caller(&state, &headers).await;

    match state
        .payments
        .find_or_create_conversation(caller, &body.creator_id)
        .await
    {
        Ok(conversation) => Json(json!({ "conversation_id": conversation.id })).into_response(),
        Err(e) => e.into_response(),
    }
}
