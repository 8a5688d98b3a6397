//! Bounded polling
//!
//! Replaces fixed sleeps: a check is retried until it yields a value or the
//! attempt budget derived from the timeout runs out.

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// `ceil(timeout / interval)`, never less than one
    pub fn max_attempts(&self) -> u32 {
        if self.interval.is_zero() {
            return 1;
        }
        let interval = self.interval.as_nanos();
        let attempts = self.timeout.as_nanos().div_ceil(interval);
        attempts.clamp(1, u32::MAX as u128) as u32
    }
}

/// Poll `check` until it returns `Some`, sleeping the policy interval
/// between attempts
pub async fn poll_until<T, P, Fut>(policy: PollPolicy, condition: &str, check: P) -> HarnessResult<T>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = HarnessResult<Option<T>>>,
{
    let interval = policy.interval;
    poll_until_with(policy, condition, check, move || async move {
        tokio::time::sleep(interval).await;
        Ok(())
    })
    .await
}

/// Like [`poll_until`] with a custom step between attempts, e.g. advancing
/// an in-memory clock instead of sleeping. A failing step ends the poll.
pub async fn poll_until_with<T, P, Fut, W, WFut>(
    policy: PollPolicy,
    condition: &str,
    mut check: P,
    mut wait: W,
) -> HarnessResult<T>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = HarnessResult<Option<T>>>,
    W: FnMut() -> WFut,
    WFut: Future<Output = HarnessResult<()>>,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts();

    for attempt in 1..=max_attempts {
        if let Some(value) = check().await? {
            debug!(condition, attempt, "condition met");
            return Ok(value);
        }
        if attempt < max_attempts {
            wait().await?;
        }
    }

    Err(HarnessError::Timeout {
        condition: condition.to_string(),
        attempts: max_attempts,
        waited: started.elapsed(),
    })
}
