//! Bounded polling.

use crate::error::{HarnessError, HarnessResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Interval between probe attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll `probe` every [`POLL_INTERVAL`] until it yields a value or `timeout`
/// elapses. `what` names the awaited condition in the timeout error.
pub async fn poll_until<T, F, Fut>(timeout: Duration, what: &str, mut probe: F) -> HarnessResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = HarnessResult<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(HarnessError::Timeout(timeout, what.to_string()));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
