//! Bounded suspension points
//!
//! Every wait in the audit is bounded. This wrapper turns an elapsed
//! `tokio::time::timeout` into a typed [`AuditError::Timeout`] that names
//! the operation.

use std::future::Future;
use std::time::Duration;

use crate::error::{AuditError, AuditResult};

/// Run `operation` with an explicit deadline.
///
/// # Returns
/// * `Ok(T)` - operation completed in time
/// * `Err` - the operation failed, or `AuditError::Timeout` if the deadline passed
pub async fn with_timeout<F, T>(operation: F, timeout: Duration, operation_name: &str) -> AuditResult<T>
where
    F: Future<Output = AuditResult<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(AuditError::Timeout {
            operation: operation_name.to_string(),
            timeout,
        }),
    }
}

/// Sleep for a settle delay; zero durations return immediately.
pub async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
