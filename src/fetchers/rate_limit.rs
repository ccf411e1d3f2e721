use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces outbound requests at least `delay` apart.
///
/// Clones share the same timer, so every fetcher built from one limiter is
/// serialized against the others. Separate limiters never interfere.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    delay: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait until the delay since the previous request has passed, then claim the slot
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            let now = Instant::now();
            if ready_at > now {
                ::log::debug!("Rate limiting: waiting {:?}", ready_at - now);
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}
