//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use leadbot_chat::SessionManager;
use leadbot_core::config::LeadbotConfig;
use leadbot_notify::{Mailer, NotifyError};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup.
    pub config: Arc<LeadbotConfig>,
    pub sessions: Arc<SessionManager>,
    pub mailer: Arc<Mailer>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: LeadbotConfig, mailer: Mailer) -> Self {
        let sessions = SessionManager::from_config(&config);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            mailer: Arc::new(mailer),
            start_time: Instant::now(),
        }
    }

    /// Build the state with the notification backend named in the config.
    pub fn from_config(config: LeadbotConfig) -> Result<Self, NotifyError> {
        let mailer = Mailer::from_config(&config.notify)?;
        Ok(Self::new(config, mailer))
    }
}
