//! v1 Chat handler.
//!
//! One request runs one full pipeline turn against the user's named session
//! and persists the updated session map before answering.

use axum::extract::State;
use validator::Validate;

use crate::api::v1::dto::{ChatRequest, ChatResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{next_session_name, ConversationLog, SessionMap};

/// `POST /api/v1/chat`
///
/// Creates the user and session on first use. Pipeline-internal failures
/// come back as a polite fallback outcome, not an error; only persistence
/// failures surface as HTTP errors.
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Turn processed", body = ChatResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<ChatRequest>,
) -> ApiResponse<ChatResponse> {
    if let Err(e) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "User id cannot be empty");
    }

    match state.db.user_exists(user_id).await {
        Ok(false) => {
            if let Err(e) = state.db.create_user(user_id).await {
                return e.into();
            }
        }
        Ok(true) => {}
        Err(e) => return e.into(),
    }

    let mut sessions: SessionMap = match state.db.get_sessions(user_id).await {
        Ok(map) => map.unwrap_or_default(),
        Err(e) => return e.into(),
    };

    let chat_name = match req.chat_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => next_session_name(user_id, &sessions),
    };

    let mut log = ConversationLog::from_turns(sessions.get(&chat_name).cloned().unwrap_or_default());

    let outcome = match state.chat.handle_turn(&mut log, &req.message).await {
        Ok(outcome) => outcome,
        Err(e) => return e.into(),
    };

    sessions.insert(chat_name.clone(), log.into_turns());

    if let Err(e) = state.db.put_sessions(user_id, &sessions).await {
        tracing::error!(user_id, error = %e, "Failed to persist chat session");
        return e.into();
    }

    ApiResponse::success(ChatResponse::from_outcome(chat_name, outcome))
}
