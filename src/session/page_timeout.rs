//! Timeout utilities for page operations
//!
//! A CDP call that never answers would stall the campaign forever. Wrapping
//! each call in `tokio::time::timeout` turns that hang into a
//! `SessionError::Timeout`, which the evaluation retry ladder knows how to
//! handle.

use std::future::Future;
use std::time::Duration;

use super::SessionError;

/// Run a page operation with an explicit timeout
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err(SessionError::Timeout)` - The timeout was reached
/// * `Err(e)` - The operation's own error, unchanged
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T, SessionError>
where
    F: Future<Output = Result<T, SessionError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(SessionError::Timeout(format!(
            "{operation_name} timeout after {}ms",
            timeout.as_millis()
        ))),
    }
}
