use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::state::AppState;

pub async fn list_conversations(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.conversations.clone())
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<u32>,
) -> Result<impl IntoResponse, StatusCode> {
    let conversation = state
        .conversations
        .iter()
        .find(|c| c.id == conversation_id)
        .cloned()
        .ok_or_else(|| {
            debug!("conversation {} not found", conversation_id);
            StatusCode::NOT_FOUND
        })?;

    Ok(Json(conversation))
}
