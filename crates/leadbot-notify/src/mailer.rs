//! Mailer: renders notifications and hands them to the configured backend.
//!
//! Chat notifications are fire-and-forget. A failed delivery is logged and
//! never reaches the visitor. Contact-form deliveries report their result.

use std::sync::Arc;

use chrono::Local;
use tokio::task::JoinHandle;

use leadbot_core::config::NotifyConfig;
use leadbot_core::types::NotificationRequest;

use crate::contact_form::ContactSubmission;
use crate::email::{render_chat_email, render_contact_email};
use crate::error::NotifyError;
use crate::notifier::{LogNotifier, MemoryNotifier, Notifier};

pub struct Mailer {
    notifier: Arc<dyn Notifier>,
    config: NotifyConfig,
}

impl Mailer {
    pub fn new(notifier: Arc<dyn Notifier>, config: NotifyConfig) -> Self {
        Self { notifier, config }
    }

    /// Build a mailer with the backend named in `config.backend`.
    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let notifier: Arc<dyn Notifier> = match config.backend.as_str() {
            "log" => Arc::new(LogNotifier),
            "memory" => Arc::new(MemoryNotifier::new()),
            other => {
                return Err(NotifyError::Config(format!(
                    "unknown notification backend: {}",
                    other
                )))
            }
        };
        if config.backend == "memory" {
            tracing::warn!("Memory notification backend keeps e-mails in process only");
        }
        tracing::info!(backend = notifier.name(), enabled = config.enabled, "Mailer ready");
        Ok(Self::new(notifier, config.clone()))
    }

    pub fn backend(&self) -> &'static str {
        self.notifier.name()
    }

    /// Deliver a chat notification. Disabled mailers drop it.
    pub async fn send_notification(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        if !self.config.enabled {
            tracing::debug!(lead = request.is_lead(), "Notifications disabled, dropping");
            return Ok(());
        }
        let email = render_chat_email(request, &self.config, &Local::now());
        self.notifier.deliver(&email).await?;
        tracing::info!(
            backend = self.notifier.name(),
            lead = request.is_lead(),
            "Chat notification delivered"
        );
        Ok(())
    }

    /// Validate and deliver a contact-form submission.
    pub async fn send_contact_form(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        submission.validate()?;
        if !self.config.enabled {
            return Err(NotifyError::Disabled);
        }
        let email = render_contact_email(submission, &self.config);
        self.notifier.deliver(&email).await?;
        tracing::info!(service = %submission.service, "Contact form delivered");
        Ok(())
    }

    /// Send a chat notification on a background task.
    pub fn dispatch_detached(self: &Arc<Self>, request: NotificationRequest) -> JoinHandle<()> {
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = mailer.send_notification(&request).await {
                tracing::warn!(error = %e, lead = request.is_lead(), "Chat notification failed");
            }
        })
    }
}
