//! Retry policy for downstream calls.
//!
//! The policy is a plain value: it holds no per-call state, so one instance can
//! drive any number of concurrent calls. When attempts run out the caller gets
//! back the failure from the last attempt, not a wrapper about retrying.

use std::future::Future;
use std::time::Duration;

use crate::ClassifiedFailure;

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed { delay: Duration },
    /// `base * factor^retry`, capped at `max`, optionally jittered by +/- 50%.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Fixed {
            delay: Duration::from_secs(1),
        }
    }
}

impl Backoff {
    /// Delay before retry number `retry` (0-based).
    pub fn delay(self, retry: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
                let seconds = (base.as_secs_f64() * factor.powi(exponent)).min(max.as_secs_f64());
                let delay = Duration::from_secs_f64(seconds.max(0.0));

                if !jitter {
                    return delay;
                }

                let half_ms = (delay.as_millis() / 2) as u64;
                let offset = fastrand::u64(0..=half_ms.saturating_mul(2));
                let total_ms = (delay.as_millis() as u64 + offset).saturating_sub(half_ms);
                Duration::from_millis(total_ms)
            }
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Bounded retry with a failure filter.
///
/// Defaults: 3 retries (4 attempts in total), 1 second apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// When false, every call makes exactly one attempt.
    pub enabled: bool,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay schedule between attempts.
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            backoff: Backoff::default(),
        }
    }
}

impl RetryPolicy {
    /// `max_retries` retries, each preceded by the same `delay`.
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            enabled: true,
            max_retries,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// Doubling delays from `base` up to `max`, with +/- 50% jitter.
    pub fn exponential(base: Duration, max: Duration, max_retries: u32) -> Self {
        Self {
            enabled: true,
            max_retries,
            backoff: Backoff::Exponential {
                base,
                factor: 2.0,
                max,
                jitter: true,
            },
        }
    }

    /// Single attempt; failures are returned as they happen.
    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Total attempts a call may make, first one included.
    pub const fn max_attempts(&self) -> u32 {
        if self.enabled {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// `retries_so_far` counts retries already performed for this call.
    pub fn decide<E>(
        &self,
        retries_so_far: u32,
        failure: &E,
        should_retry: impl Fn(&E) -> bool,
    ) -> RetryDecision {
        if !self.enabled || retries_so_far >= self.max_retries || !should_retry(failure) {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff.delay(retries_so_far))
    }

    /// Runs `operation`, retrying server errors only.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<T, ClassifiedFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClassifiedFailure>>,
    {
        self.execute_when(ClassifiedFailure::retryable, operation)
            .await
    }

    /// Runs `operation` until it succeeds, `should_retry` rejects the failure,
    /// or the retry budget is spent. The returned error is always the one the
    /// last attempt produced.
    pub async fn execute_when<T, E, P, F, Fut>(
        &self,
        should_retry: P,
        mut operation: F,
    ) -> Result<T, E>
    where
        P: Fn(&E) -> bool,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut retries = 0u32;
        loop {
            let failure = match operation().await {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            match self.decide(retries, &failure, &should_retry) {
                RetryDecision::NoRetry => {
                    if retries > 0 {
                        tracing::warn!(
                            attempts = retries + 1,
                            error = %failure,
                            "giving up after retries"
                        );
                    }
                    return Err(failure);
                }
                RetryDecision::RetryAfter(delay) => {
                    retries += 1;
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "retrying failed downstream call"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
