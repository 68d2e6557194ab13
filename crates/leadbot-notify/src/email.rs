//! Outbound e-mail rendering.
//!
//! Chat transcripts and contact-form submissions are both delivered as the
//! same template fields, so a single notifier handles both.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use leadbot_core::config::NotifyConfig;
use leadbot_core::types::NotificationRequest;

use crate::contact_form::ContactSubmission;

const NOT_PROVIDED: &str = "Not provided";

/// Template fields of one outbound e-mail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to_email: String,
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub service_type: String,
    pub body: String,
}

/// Render a chat notification.
///
/// The contact block is included only for completed leads.
pub fn render_chat_email<Tz>(
    request: &NotificationRequest,
    config: &NotifyConfig,
    at: &DateTime<Tz>,
) -> OutboundEmail
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let contact_block = match &request.contact {
        Some(contact) => format!(
            "Contact Information:\n\
             - Name: {}\n\
             - Phone: {}\n\
             - Email: {}\n\
             - Inquiring About: {}\n\n",
            or_default(&contact.name, NOT_PROVIDED),
            or_default(&contact.phone, NOT_PROVIDED),
            or_default(&contact.email, NOT_PROVIDED),
            or_default(&contact.topic, "General inquiry"),
        ),
        None => String::new(),
    };

    OutboundEmail {
        to_email: config.recipient.clone(),
        from_name: "Website Chat".to_string(),
        from_email: config.from_email.clone(),
        phone: "N/A".to_string(),
        service_type: "Chat Conversation".to_string(),
        body: format!(
            "A new chat conversation has been recorded:\n\n{}\n\n{}Timestamp: {}",
            request.message,
            contact_block,
            at.format("%-m/%-d/%Y, %-I:%M:%S %p"),
        ),
    }
}

/// Render a contact-form submission. The submission should already be validated.
pub fn render_contact_email(submission: &ContactSubmission, config: &NotifyConfig) -> OutboundEmail {
    let phone = submission
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(NOT_PROVIDED);

    OutboundEmail {
        to_email: config.recipient.clone(),
        from_name: submission.name.clone(),
        from_email: submission.email.clone(),
        phone: phone.to_string(),
        service_type: submission.service.clone(),
        body: format!(
            "A message by {name} has been received:\n\n\
             Contact Details:\n\
             - Name: {name}\n\
             - Email: {email}\n\
             - Phone: {phone}\n\
             - Service Type: {service}\n\n\
             Message:\n{message}",
            name = submission.name,
            email = submission.email,
            phone = phone,
            service = submission.service,
            message = submission.message,
        ),
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadbot_core::types::Contact;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_relay_email_has_no_contact_block() {
        let req = NotificationRequest::relay("User: hi\n\nBot: hello");
        let email = render_chat_email(&req, &NotifyConfig::default(), &fixed_time());

        assert_eq!(email.to_email, "mendezfabian880@gmail.com");
        assert_eq!(email.from_name, "Website Chat");
        assert_eq!(email.from_email, "chat@mendezroofing.com");
        assert_eq!(email.phone, "N/A");
        assert_eq!(email.service_type, "Chat Conversation");
        assert_eq!(
            email.body,
            "A new chat conversation has been recorded:\n\n\
             User: hi\n\nBot: hello\n\n\
             Timestamp: 3/7/2024, 3:04:05 PM"
        );
    }

    #[test]
    fn test_lead_email_lists_contact() {
        let req = NotificationRequest::lead(
            "Bot: Contact information collected.",
            Contact {
                name: "Jane Doe".into(),
                phone: "555-1234".into(),
                email: "jane@x.com".into(),
                topic: "quote".into(),
            },
        );
        let email = render_chat_email(&req, &NotifyConfig::default(), &fixed_time());
        assert!(email.body.contains(
            "Contact Information:\n- Name: Jane Doe\n- Phone: 555-1234\n- Email: jane@x.com\n- Inquiring About: quote\n\nTimestamp:"
        ));
    }

    #[test]
    fn test_lead_email_fills_blanks() {
        let req = NotificationRequest::lead("...", Contact::default());
        let email = render_chat_email(&req, &NotifyConfig::default(), &fixed_time());
        assert!(email.body.contains("- Name: Not provided"));
        assert!(email.body.contains("- Inquiring About: General inquiry"));
    }

    #[test]
    fn test_contact_email_body() {
        let submission = ContactSubmission {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            phone: None,
            service: "Roof Repairs".into(),
            message: "Shingles blew off.".into(),
        };
        let email = render_contact_email(&submission, &NotifyConfig::default());
        assert_eq!(email.from_name, "Sam");
        assert_eq!(email.from_email, "sam@example.com");
        assert_eq!(email.phone, "Not provided");
        assert_eq!(email.service_type, "Roof Repairs");
        assert_eq!(
            email.body,
            "A message by Sam has been received:\n\n\
             Contact Details:\n\
             - Name: Sam\n\
             - Email: sam@example.com\n\
             - Phone: Not provided\n\
             - Service Type: Roof Repairs\n\n\
             Message:\nShingles blew off."
        );
    }

    #[test]
    fn test_contact_email_blank_phone_is_not_provided() {
        let submission = ContactSubmission {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            phone: Some("   ".into()),
            service: "Fencing".into(),
            message: "New fence".into(),
        };
        let email = render_contact_email(&submission, &NotifyConfig::default());
        assert_eq!(email.phone, "Not provided");
    }
}
