/// Deadline-bounded retry with quadratic backoff and jitter
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total wall-clock budget across all attempts
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_wait: Duration::from_secs(16),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_wait_secs(secs: u64) -> Self {
        Self {
            max_wait: Duration::from_secs(secs),
        }
    }
}

/// Terminal failure: every attempt inside the time budget failed.
///
/// `errors` holds one captured error per attempt, in order, so
/// `errors.len()` always equals `attempts`.
#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} failed attempts")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub errors: Vec<E>,
}

/// Execute a future repeatedly until it succeeds or the time budget is spent.
///
/// The deadline is computed once at entry. It is checked after each failed
/// attempt, before the backoff sleep: the first attempt always executes, even
/// with a zero budget, and an attempt in flight is never aborted. Attempts
/// are strictly sequential.
pub async fn with_deadline_retry<F, Fut, T, E>(
    policy: RetryPolicy,
    mut op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let deadline = Instant::now() + policy.max_wait;
    let mut errors = Vec::new();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("attempt {} failed: {}", attempt, e);
                errors.push(e);

                if Instant::now() > deadline {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        errors,
                    });
                }

                tokio::time::sleep(backoff_delay(attempt)).await;
            }
        }
    }
}

/// Backoff before the next attempt, keyed to the 1-based index of the attempt
/// that just failed: `(index² + jitter) seconds`, jitter uniform in `[0, 1)`.
fn backoff_delay(attempt: u32) -> Duration {
    let base_ms = u64::from(attempt).pow(2) * 1000;
    let jitter_ms = (rand::thread_rng().gen_range(0.0..1.0) * 1000.0) as u64;
    Duration::from_millis(base_ms + jitter_ms)
}
