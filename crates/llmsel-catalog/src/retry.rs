//! Exponential backoff for throttled listing calls.

use crate::error::ListingError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retries throttling errors only; every other error returns immediately.
///
/// With the defaults (1s initial delay, doubling, 5 retries) an operation is
/// attempted at most 6 times, sleeping 1s, 2s, 4s, 8s and 16s in between.
#[derive(Debug, Clone)]
pub struct ThrottleBackoff {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for ThrottleBackoff {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

impl ThrottleBackoff {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_delay
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }

    /// Run `operation`, retrying while it reports throttling.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, ListingError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ListingError>>,
    {
        let mut retries = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_throttling() && retries < self.max_retries => {
                    let delay = self.delay_for(retries);
                    warn!(
                        attempt = retries + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, retrying"
                    );
                    sleep(delay).await;
                    retries += 1;
                }
                Err(err) if err.is_throttling() => {
                    return Err(ListingError::RetriesExhausted {
                        attempts: retries + 1,
                        last: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}
