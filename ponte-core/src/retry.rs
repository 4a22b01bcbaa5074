use std::time::Duration;

use rand::Rng;

use crate::error::PonteError;

/// Backoff parameters for [`with_retry`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total invocations, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles per attempt.
    pub base_delay: Duration,
    /// Cap applied after doubling.
    pub max_delay: Duration,
    /// Additive jitter as a percentage of the computed delay.
    pub jitter_percent: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            jitter_percent: 25,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero-based), jittered.
    fn backoff(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let exp_ms = base_ms.saturating_mul(1u64 << attempt.min(20));
        let capped_ms = exp_ms.min(self.max_delay.as_millis() as u64);
        let jitter_range = std::cmp::max(
            1,
            capped_ms.saturating_mul(u64::from(self.jitter_percent)) / 100,
        );
        let mut rng = rand::rng();
        Duration::from_millis(capped_ms + rng.random_range(0..jitter_range))
    }
}

/// Runs `op` until it succeeds, fails permanently, or attempts run out.
///
/// Only errors for which [`PonteError::is_transient`] holds are retried; the
/// last error is returned unchanged, so callers see exactly what the vendor
/// said. Callers decide what to wrap: reads and token refreshes go through
/// here, order and payment writes do not.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, PonteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PonteError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt + 1 < policy.max_attempts.max(1) => {
                let wait = policy.backoff(attempt);
                tracing::debug!(
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    error = %err,
                    "retrying transient failure"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
