//! # Retry Policy
//!
//! Deterministic exponential backoff shared by the Notion query and the
//! desktop notifier. There is no error classification: every failure is
//! retried until the attempt budget runs out.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::warn;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Notion query: waits 2, 4, 8, 16, 32 seconds
    pub const FETCH: RetryPolicy = RetryPolicy {
        max_attempts: 6,
        base_delay: Duration::from_secs(2),
    };

    /// notify-send: waits 1, 2, 4, 8, 16 seconds (the notification daemon may
    /// still be starting when we run at login)
    pub const NOTIFY: RetryPolicy = RetryPolicy {
        max_attempts: 6,
        base_delay: Duration::from_secs(1),
    };

    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Wait inserted after failed attempt `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Every wait the policy can insert, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts).map(|n| self.delay_after(n)).collect()
    }

    /// Run `op` until it succeeds or the budget is spent.
    ///
    /// `op` receives the 1-based attempt number. On exhaustion the error
    /// from the final attempt is returned.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    warn!(
                        "{label} failed on attempt {attempt}/{}: {e}; giving up",
                        self.max_attempts
                    );
                    return Err(e);
                }
                Err(e) => {
                    let wait = self.delay_after(attempt);
                    warn!(
                        "{label} failed on attempt {attempt}/{}: {e}; retrying in {}s",
                        self.max_attempts,
                        wait.as_secs()
                    );
                    sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }
}
