//! leadbot-notify: forwarding chat transcripts, leads and contact-form
//! submissions to the business inbox.

pub mod contact_form;
pub mod email;
pub mod error;
pub mod mailer;
pub mod notifier;

pub use contact_form::ContactSubmission;
pub use email::OutboundEmail;
pub use error::NotifyError;
pub use mailer::Mailer;
pub use notifier::{LogNotifier, MemoryNotifier, Notifier};
