//! Dispatch throttle
//!
//! Enforces a minimum interval between outbound calls. One limiter is
//! shared (via `Arc`) by every analysis in the process; the wait happens
//! while the lock is held, so near-simultaneous callers are serialized and
//! each one observes the previous caller's dispatch time.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(20);

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait out the remainder of the window, then record a dispatch.
    /// Returns how long the caller was held back.
    pub async fn throttle(&self) -> Duration {
        let mut last = self.last_dispatch.lock().await;

        let delay = last
            .map(|previous| self.min_interval.saturating_sub(previous.elapsed()))
            .unwrap_or_default();

        if !delay.is_zero() {
            tracing::info!("Rate limiting: waiting {}ms before next request", delay.as_millis());
            tokio::time::sleep(delay).await;
        }

        *last = Some(Instant::now());
        delay
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_dispatch_is_immediate() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        assert_eq!(limiter.throttle().await, Duration::ZERO);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_dispatches_are_spaced() {
        let limiter = RateLimiter::default();
        limiter.throttle().await;
        let first = Instant::now();

        limiter.throttle().await;
        assert!(first.elapsed() >= DEFAULT_MIN_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_window_waits_only_remainder() {
        let limiter = RateLimiter::default();
        limiter.throttle().await;
        tokio::time::advance(Duration::from_secs(15)).await;

        let waited = limiter.throttle().await;
        assert_eq!(waited, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_elapsed_no_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(2));
        limiter.throttle().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(limiter.throttle().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_serialize() {
        let limiter = Arc::new(RateLimiter::default());

        let dispatch = |limiter: Arc<RateLimiter>| async move {
            limiter.throttle().await;
            Instant::now()
        };

        let (a, b) = tokio::join!(dispatch(limiter.clone()), dispatch(limiter.clone()));
        let gap = if a > b { a - b } else { b - a };
        assert!(gap >= DEFAULT_MIN_INTERVAL);
    }
}
