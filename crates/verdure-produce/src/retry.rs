//! Exponential-backoff retry for transient upstream errors.
//!
//! Only rate limiting (429) and network-level failures are retried;
//! deserialization problems and unexpected statuses are propagated
//! immediately. The curation pipeline itself never retries — this lives at
//! the client layer.

use std::future::Future;
use std::time::Duration;

use crate::error::ProduceError;

fn is_retriable(err: &ProduceError) -> bool {
    matches!(
        err,
        ProduceError::RateLimited { .. } | ProduceError::Http(_)
    )
}

/// Executes `operation`, sleeping `backoff_base_secs * 2^attempt` seconds
/// between retries of transient errors, up to `max_retries` additional
/// attempts after the first try. The last error is returned when retries
/// are exhausted; non-retriable errors return immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ProduceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProduceError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }

                let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_secs,
                    error = %err,
                    "transient upstream error — retrying after backoff"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
