//! Chat session manager.
//!
//! Owns one [`ConversationState`] per visitor session, validates incoming
//! messages, and expires idle sessions. Each turn runs under the session
//! lock, so a session never sees two turns at once.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use leadbot_core::config::{ChatConfig, LeadbotConfig};
use leadbot_core::types::{Message, NotificationRequest};

use crate::engine::{ContactStage, ConversationEngine, ConversationState, TurnRoute};
use crate::error::ChatError;

/// A live chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub state: ConversationState,
    pub started_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

/// Summary row for session listings.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub started_at: String,
    pub last_message_at: String,
    pub message_count: usize,
    pub stage: ContactStage,
}

/// Everything a front end needs after one visitor turn.
#[derive(Debug, Clone)]
pub struct SessionTurn {
    pub session_id: Uuid,
    pub reply: Message,
    pub route: TurnRoute,
    pub stage: ContactStage,
    pub history_len: usize,
    /// Forward to the notifier; the session does not deliver it.
    pub notification: Option<NotificationRequest>,
}

/// Routes visitor messages to per-session conversation state.
pub struct SessionManager {
    engine: ConversationEngine,
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
    config: ChatConfig,
}

impl SessionManager {
    pub fn new(engine: ConversationEngine, config: ChatConfig) -> Self {
        Self {
            engine,
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn from_config(config: &LeadbotConfig) -> Self {
        Self::new(ConversationEngine::from_config(config), config.chat.clone())
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Open a new session and return its id with the greeting.
    pub fn open_session(&self) -> Result<(Uuid, Message), ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        let mut sessions = self.lock()?;
        let session = self.create_session();
        let id = session.id;
        let greeting = session.state.history()[0].clone();
        sessions.insert(id, session);
        tracing::debug!(session_id = %id, "Chat session opened");
        Ok((id, greeting))
    }

    /// Handle a visitor message.
    ///
    /// The text is trimmed before it reaches the engine. An unknown or
    /// expired `session_id` starts a new session.
    pub fn handle_message(
        &self,
        message: &str,
        session_id: Option<Uuid>,
    ) -> Result<SessionTurn, ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }

        let text = message.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }

        let now = Utc::now();
        let mut sessions = self.lock()?;
        let sid = self.resolve_session(&mut sessions, session_id, now);
        let session = sessions
            .get_mut(&sid)
            .ok_or(ChatError::SessionNotFound(sid))?;

        let outcome = self.engine.handle_user_turn(&mut session.state, text);
        session.last_message_at = now;

        Ok(SessionTurn {
            session_id: sid,
            reply: outcome.reply,
            route: outcome.route,
            stage: session.state.stage(),
            history_len: session.state.history().len(),
            notification: outcome.notification,
        })
    }

    /// Full message history of a session.
    pub fn get_history(&self, session_id: Uuid) -> Result<Vec<Message>, ChatError> {
        let sessions = self.lock()?;
        sessions
            .get(&session_id)
            .map(|s| s.state.history().to_vec())
            .ok_or(ChatError::SessionNotFound(session_id))
    }

    /// Snapshot of a session.
    pub fn get_session(&self, session_id: Uuid) -> Option<ChatSession> {
        self.sessions
            .lock()
            .ok()
            .and_then(|s| s.get(&session_id).cloned())
    }

    /// All sessions, oldest first.
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        let sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        let mut summaries: Vec<SessionSummary> = sessions
            .values()
            .map(|s| SessionSummary {
                id: s.id,
                started_at: s.started_at.to_rfc3339(),
                last_message_at: s.last_message_at.to_rfc3339(),
                message_count: s.state.history().len(),
                stage: s.state.stage(),
            })
            .collect();
        summaries.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        summaries
    }

    pub fn delete_session(&self, session_id: Uuid) -> Result<(), ChatError> {
        let mut sessions = self.lock()?;
        if sessions.remove(&session_id).is_some() {
            tracing::debug!(session_id = %session_id, "Chat session deleted");
            Ok(())
        } else {
            Err(ChatError::SessionNotFound(session_id))
        }
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = match self.sessions.lock() {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Session lock poisoned: {}", e);
                return 0;
            }
        };
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, "Expired chat sessions purged");
        }
        removed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    // -- Private helpers --

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, ChatSession>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::Internal(format!("session lock poisoned: {}", e)))
    }

    fn create_session(&self) -> ChatSession {
        let now = Utc::now();
        ChatSession {
            id: Uuid::new_v4(),
            state: self.engine.start(),
            started_at: now,
            last_message_at: now,
        }
    }

    fn is_expired(&self, session: &ChatSession, now: DateTime<Utc>) -> bool {
        let timeout = Duration::minutes(i64::from(self.config.session_timeout_minutes));
        now - session.last_message_at > timeout
    }

    /// Reuse a live session or create a new one.
    fn resolve_session(
        &self,
        sessions: &mut HashMap<Uuid, ChatSession>,
        requested: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Uuid {
        if let Some(sid) = requested {
            match sessions.get(&sid) {
                Some(session) if !self.is_expired(session, now) => return sid,
                Some(_) => {
                    tracing::debug!(session_id = %sid, "Chat session expired, starting a new one");
                    sessions.remove(&sid);
                }
                None => {
                    tracing::debug!(session_id = %sid, "Unknown chat session, starting a new one");
                }
            }
        }

        let session = self.create_session();
        let sid = session.id;
        sessions.insert(sid, session);
        sid
    }
}

// =============================================================================
// Tests
// =============================================================================
