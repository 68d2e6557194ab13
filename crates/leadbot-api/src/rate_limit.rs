//! Fixed-window rate limiter middleware.
//!
//! Counts requests per wall-clock second. The chat and contact routes share
//! one limiter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Extension, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorBody;

const LOW_MASK: u64 = 0xFFFF_FFFF;

#[derive(Clone)]
pub struct RateLimiter {
    max_per_sec: u64,
    /// Window second in the high 32 bits, request count in the low 32 bits.
    /// Both change together in one compare-exchange.
    state: Arc<AtomicU64>,
}

impl RateLimiter {
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec: max_per_sec.min(LOW_MASK),
            state: Arc::new(AtomicU64::new(0)),
        }
    }

    fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now)
    }

    fn try_acquire_at(&self, now: u64) -> bool {
        let window = now & LOW_MASK;
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let next = if current >> 32 != window {
                (window << 32) | 1
            } else if current & LOW_MASK < self.max_per_sec {
                current + 1
            } else {
                return false;
            };
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

pub async fn rate_limit_middleware(
    Extension(limiter): Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        return next.run(req).await;
    }
    tracing::debug!(path = %req.uri().path(), "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorBody {
            error: "too_many_requests".to_string(),
            message: "Rate limit exceeded".to_string(),
        }),
    )
        .into_response()
}
