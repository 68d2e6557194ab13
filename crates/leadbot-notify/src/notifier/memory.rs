use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::email::OutboundEmail;
use crate::error::NotifyError;
use crate::notifier::Notifier;

/// Outbox size used by [`MemoryNotifier::new`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Keeps the most recent delivered e-mails in memory. Used by tests and
/// local dry runs. Once full, the oldest e-mail is evicted.
pub struct MemoryNotifier {
    outbox: Mutex<VecDeque<OutboundEmail>>,
    capacity: usize,
    failing: AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outbox: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent deliveries fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the retained e-mails, oldest first.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery {
                backend: self.name(),
                reason: "delivery rejected".to_string(),
            });
        }
        let mut outbox = self.outbox.lock().map_err(|e| NotifyError::Delivery {
            backend: self.name(),
            reason: e.to_string(),
        })?;
        if outbox.len() == self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(email.clone());
        Ok(())
    }
}
