use async_trait::async_trait;

use crate::email::OutboundEmail;
use crate::error::NotifyError;
use crate::notifier::Notifier;

/// Writes each e-mail to the tracing log instead of sending it.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        tracing::info!(
            to = %email.to_email,
            from = %email.from_name,
            service = %email.service_type,
            body = %email.body,
            "Notification e-mail"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let email = OutboundEmail {
            to_email: "owner@example.com".into(),
            from_name: "Website Chat".into(),
            from_email: "chat@example.com".into(),
            phone: "N/A".into(),
            service_type: "Chat Conversation".into(),
            body: "hello".into(),
        };
        assert_eq!(LogNotifier.name(), "log");
        assert!(LogNotifier.deliver(&email).await.is_ok());
    }
}
