//! Route handler functions for all API endpoints.

use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadbot_chat::{ContactStage, SessionSummary, TurnRoute};
use leadbot_core::types::Message;
use leadbot_notify::ContactSubmission;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request and response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenSessionResponse {
    pub session_id: Uuid,
    pub greeting: Message,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omitted on the first message; a new session is opened.
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: Message,
    pub route: TurnRoute,
    pub stage: ContactStage,
    pub history_len: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.sessions.session_count(),
    })
}

/// POST /chat/sessions - open a session and return the greeting.
pub async fn open_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<OpenSessionResponse>), ApiError> {
    let (session_id, greeting) = state.sessions.open_session()?;
    Ok((
        StatusCode::CREATED,
        Json(OpenSessionResponse {
            session_id,
            greeting,
        }),
    ))
}

/// POST /chat - run one visitor turn.
///
/// The reply is held back for `chat.reply_delay_ms` to mimic typing. Any
/// notification produced by the turn is delivered in the background.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload?;
    let turn = state.sessions.handle_message(&body.message, body.session_id)?;

    let delay = state.sessions.config().reply_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if let Some(notification) = turn.notification {
        state.mailer.dispatch_detached(notification);
    }

    tracing::debug!(
        session_id = %turn.session_id,
        stage = ?turn.stage,
        "Chat turn handled"
    );

    Ok(Json(ChatResponse {
        session_id: turn.session_id,
        reply: turn.reply,
        route: turn.route,
        stage: turn.stage,
        history_len: turn.history_len,
    }))
}

/// GET /chat/sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.sessions.list_sessions(),
    })
}

/// GET /chat/sessions/{id}/history
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let messages = state.sessions.get_history(session_id)?;
    Ok(Json(HistoryResponse {
        session_id,
        messages,
    }))
}

/// DELETE /chat/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.delete_session(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /contact - deliver a contact-form submission.
pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(submission) = payload?;
    state.mailer.send_contact_form(&submission).await?;
    Ok(Json(ContactResponse {
        success: true,
        message: format!(
            "Thank you for your message! We will get back to you shortly. \
             Your message has been sent to {}",
            state.config.notify.recipient
        ),
    }))
}
