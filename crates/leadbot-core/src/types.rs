use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Messages
// =============================================================================

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Speaker label used in plain-text transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Bot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Bot => write!(f, "bot"),
        }
    }
}

/// A single chat message as rendered by the widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Display text. May contain line breaks.
    pub content: String,
    /// Quick-reply labels. Always empty for user messages.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Message {
    /// A message typed (or clicked) by the visitor.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            options: Vec::new(),
        }
    }

    /// A bot message without quick replies.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::bot_with_options(content, Vec::new())
    }

    /// A bot message offering quick replies.
    pub fn bot_with_options(content: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            options,
        }
    }
}

/// Render messages as a `Speaker: text` transcript, one blank line between turns.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

// =============================================================================
// Contact
// =============================================================================

/// One of the three fields collected from a visitor, in collection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Phone,
    Email,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::Name => write!(f, "name"),
            ContactField::Phone => write!(f, "phone"),
            ContactField::Email => write!(f, "email"),
        }
    }
}

/// Contact details gathered during a chat, plus what the visitor asked about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Free-form label of the inquiry ("quote", "general inquiry", ...).
    pub topic: String,
}

impl Contact {
    /// The first empty field in name, phone, email order.
    pub fn next_missing(&self) -> Option<ContactField> {
        if self.name.is_empty() {
            Some(ContactField::Name)
        } else if self.phone.is_empty() {
            Some(ContactField::Phone)
        } else if self.email.is_empty() {
            Some(ContactField::Email)
        } else {
            None
        }
    }

    /// Set a field's value.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Phone => self.phone = value,
            ContactField::Email => self.email = value,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// A request to forward a transcript (and optionally a lead) to the business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Transcript or single-turn excerpt.
    pub message: String,
    /// Contact record, present only when a lead was completed.
    pub contact: Option<Contact>,
}

impl NotificationRequest {
    /// A completed lead: full transcript plus the collected contact.
    pub fn lead(message: impl Into<String>, contact: Contact) -> Self {
        Self {
            message: message.into(),
            contact: Some(contact),
        }
    }

    /// A single exchange relayed without contact details.
    pub fn relay(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            contact: None,
        }
    }

    pub fn is_lead(&self) -> bool {
        self.contact.is_some()
    }
}
