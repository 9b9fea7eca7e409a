use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after the 1-based `attempt` failed: `base_delay * attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.max(1))
    }

    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, dur: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

impl RemoteClient {
    async fn pause_after(&self, attempt: u32) {
        if !self.retry.is_last(attempt) {
            let delay = self.retry.backoff(attempt);
            debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off");
            self.sleeper.sleep(delay).await;
        }
    }

    /// Waits for a credential, spending one attempt per absent token.
    pub(super) async fn acquire_token(&self, label: &str) -> Result<String, LeaseError> {
        for attempt in 1..=self.retry.max_attempts {
            if let Some(token) = self.tokens.token().await {
                return Ok(token);
            }
            warn!(attempt, "{}: no credential available", label);
            self.pause_after(attempt).await;
        }
        Err(LeaseError::AuthTransient(format!(
            "{}: no credential after {} attempts",
            label, self.retry.max_attempts
        )))
    }

    /// Runs `f` with a fresh credential per attempt. Only an absent token or
    /// `AuthTransient` from `f` is retried; every other outcome ends the loop.
    pub(super) async fn with_auth_retries<T, F, Fut>(
        &self,
        label: &str,
        mut f: F,
    ) -> Result<T, LeaseError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, LeaseError>>,
    {
        for attempt in 1..=self.retry.max_attempts {
            let Some(token) = self.tokens.token().await else {
                warn!(attempt, "{}: no credential available", label);
                self.pause_after(attempt).await;
                continue;
            };
            debug!(attempt, "{}", label);
            match f(token).await {
                Err(LeaseError::AuthTransient(msg)) => {
                    warn!(attempt, "{}: {}", label, msg);
                    self.pause_after(attempt).await;
                }
                other => return other,
            }
        }
        Err(LeaseError::Fetch("exhausted retries".to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/remote/retry_tests.rs"]
mod tests;
