use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::respond;
use crate::errors::AppError;
use crate::session::{ChatTurn, Role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub history: Vec<ChatTurn>,
}

/// POST /api/v1/chat
///
/// One follow-up turn against the active report. The session lock is held
/// across the model call — operations are sequential by design, there is
/// exactly one session.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = req.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::Validation("Question must not be empty".to_string()));
    }

    let mut session = state.session.lock().await;
    let report = session
        .report
        .clone()
        .ok_or_else(|| AppError::Validation(
            "No active report — generate or load an analysis first".to_string(),
        ))?;

    let reply = respond(&state.llm, &session.chat_history, &question, &report).await;

    session.chat_history.push(ChatTurn {
        role: Role::User,
        content: question,
    });
    session.chat_history.push(ChatTurn {
        role: Role::Assistant,
        content: reply.clone(),
    });

    Ok(Json(ChatResponse {
        reply,
        history: session.chat_history.clone(),
    }))
}
