use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::UnavailableReason;

/// Minimum-interval throttle for one source.
///
/// A call attempted too early is refused, never queued or retried.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_call: Mutex::new(None) }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Check and stamp under one lock. A refused call does not move the stamp.
    pub fn try_acquire(&self) -> Result<(), UnavailableReason> {
        let now = Instant::now();
        let mut last = self.last_call.lock();
        if let Some(prev) = *last {
            let elapsed = now.saturating_duration_since(prev);
            if elapsed < self.min_interval {
                return Err(UnavailableReason::RateLimited { retry_in: self.min_interval - elapsed });
            }
        }
        *last = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_second_call_inside_interval_is_refused() {
        let gate = RateGate::new(Duration::from_secs(2));
        assert!(gate.try_acquire().is_ok());

        tokio::time::advance(Duration::from_millis(500)).await;
        match gate.try_acquire() {
            Err(UnavailableReason::RateLimited { retry_in }) => {
                assert_eq!(retry_in, Duration::from_millis(1500))
            }
            other => panic!("expected rate limit, got {:?}", other),
        }

        // the refused call did not push the window out
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!(gate.try_acquire().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_limits() {
        let gate = RateGate::new(Duration::ZERO);
        assert!(gate.try_acquire().is_ok());
        assert!(gate.try_acquire().is_ok());
    }
}
