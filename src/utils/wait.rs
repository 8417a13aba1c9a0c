//! Polling waits
//!
//! The console renders client-side, so "is this control there yet?" is
//! answered by re-evaluating a check until it holds or the budget runs out.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{AuditError, AuditResult};

use super::constants::POLL_INTERVAL_MS;

/// Timeout and poll interval for a wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Custom timeout with the default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, Duration::from_millis(POLL_INTERVAL_MS))
    }
}

/// Poll `condition` until it yields `Ok(true)` or the timeout expires.
///
/// Errors from the condition are treated as "not yet": a script evaluated
/// mid-render can fail transiently. The condition is always checked at least
/// once, even with a zero timeout.
pub async fn wait_until<F, Fut>(condition: F, config: WaitConfig, description: &str) -> AuditResult<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AuditResult<bool>>,
{
    let start = Instant::now();

    loop {
        match condition().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => tracing::trace!("wait for {description}: transient error {e}"),
        }

        if start.elapsed() >= config.timeout {
            return Err(AuditError::Timeout {
                operation: format!("wait for {description}"),
                timeout: config.timeout,
            });
        }

        tokio::time::sleep(config.poll_interval).await;
    }
}
