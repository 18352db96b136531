//! Politeness policy between network calls
//!
//! The coordinator asks the policy how long to pause after every request,
//! listing or detail, successful or not. The default policy is a fixed
//! interval that ignores the outcome; other strategies (jitter, backoff on
//! failure) can be plugged in through [`RatePolicy`].

use crate::crawler::RequestKind;
use std::time::Duration;

/// Decides the pause that follows a network call
pub trait RatePolicy: Send + Sync {
    /// Returns how long to wait after a call of `kind` that `succeeded` or not
    fn delay_after(&self, kind: RequestKind, succeeded: bool) -> Duration;
}

/// Static interval after every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Creates a fixed delay policy
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a fixed delay policy from milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

impl RatePolicy for FixedDelay {
    fn delay_after(&self, _kind: RequestKind, _succeeded: bool) -> Duration {
        self.delay
    }
}

/// Sleeps for the policy's delay, skipping zero-length pauses
pub async fn pause(policy: &dyn RatePolicy, kind: RequestKind, succeeded: bool) {
    let delay = policy.delay_after(kind, succeeded);
    if !delay.is_zero() {
        tracing::trace!("Pausing {:?} after {:?} request", delay, kind);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_delay_ignores_outcome() {
        let policy = FixedDelay::from_millis(800);
        for kind in [RequestKind::Listing, RequestKind::Detail] {
            for succeeded in [true, false] {
                assert_eq!(
                    policy.delay_after(kind, succeeded),
                    Duration::from_millis(800)
                );
            }
        }
    }

    #[tokio::test]
    async fn test_pause_waits_at_least_delay() {
        let policy = FixedDelay::from_millis(30);
        let start = Instant::now();
        pause(&policy, RequestKind::Detail, false).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let policy = FixedDelay::from_millis(0);
        let start = Instant::now();
        pause(&policy, RequestKind::Listing, true).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
