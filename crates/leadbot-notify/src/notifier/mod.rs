//! Delivery backends.
//!
//! A `Notifier` receives fully rendered e-mails. Which backend runs is
//! chosen by `notify.backend` in the config.

pub mod log;
pub mod memory;

use async_trait::async_trait;

use crate::email::OutboundEmail;
use crate::error::NotifyError;

pub use self::log::LogNotifier;
pub use self::memory::MemoryNotifier;

/// A transport for outbound e-mails.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Backend name as written in the config.
    fn name(&self) -> &'static str;

    async fn deliver(&self, email: &OutboundEmail) -> Result<(), NotifyError>;
}
