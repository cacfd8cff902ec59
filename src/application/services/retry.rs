//! Bounded retry with a fixed pause between attempts

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Attempt count and pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause after a failed attempt; never applied after the last one
    pub delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

/// Why a retried operation gave up
#[derive(Error, Debug)]
pub enum RetryError<E: std::error::Error + 'static> {
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    #[error("attempt {attempt} failed with non-retryable error: {error}")]
    Aborted { attempt: u32, error: E },
}

/// Run `op` until it succeeds, a non-retryable error occurs, or the
/// policy's attempts run out. `op` receives the 1-based attempt number.
pub async fn retry_with_delay<T, E, F, Fut, R>(
    policy: RetryPolicy,
    is_retryable: R,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if !is_retryable(&error) => {
                return Err(RetryError::Aborted { attempt, error });
            }
            Err(error) => {
                tracing::warn!("Attempt {}/{} failed: {}", attempt, max_attempts, error);
                if attempt >= max_attempts {
                    return Err(RetryError::Exhausted { attempts: attempt, last: error });
                }
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Error, Debug)]
    enum TestError {
        #[error("transient")]
        Transient,
        #[error("fatal")]
        Fatal,
    }

    fn assert_paused_for(started: Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(50),
            "expected ~{:?}, got {:?}",
            expected,
            elapsed
        );
    }

    fn retryable(e: &TestError) -> bool {
        matches!(e, TestError::Transient)
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_after_two_pauses() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result = retry_with_delay(RetryPolicy::default(), retryable, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(TestError::Transient)
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_paused_for(started, Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_without_trailing_pause() {
        let started = Instant::now();

        let result: Result<(), _> = retry_with_delay(RetryPolicy::default(), retryable, |_| async {
            Err(TestError::Transient)
        })
        .await;

        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 3, .. })));
        assert_paused_for(started, Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_stops_immediately() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), _> = retry_with_delay(RetryPolicy::default(), retryable, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;

        assert!(matches!(result, Err(RetryError::Aborted { attempt: 1, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_policy_has_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }
}
