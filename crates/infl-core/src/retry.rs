//! Bounded retry of a fallible async operation
//!
//! Every attempt on a record goes through [`retry`]. Failures are logged at
//! warn level and the same operation is attempted again after the policy's
//! backoff, up to `max_attempts` attempts in total.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::{Backoff, Constant, Zero};
use backoff::exponential::ExponentialBackoffBuilder;
use infl_meta::{BackoffSettings, SyncSettings};
use tracing::warn;

/// Delay between two attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffStrategy {
    None,
    Fixed(Duration),
    /// Doubles from `initial` up to `max`
    Exponential { initial: Duration, max: Duration },
}

impl From<BackoffSettings> for BackoffStrategy {
    fn from(settings: BackoffSettings) -> Self {
        match settings {
            BackoffSettings::None => BackoffStrategy::None,
            BackoffSettings::Fixed { delay_ms } => {
                BackoffStrategy::Fixed(Duration::from_millis(delay_ms))
            }
            BackoffSettings::Exponential { initial_ms, max_ms } => BackoffStrategy::Exponential {
                initial: Duration::from_millis(initial_ms),
                max: Duration::from_millis(max_ms),
            },
        }
    }
}

/// Attempt budget and timing for one synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per record, including the first
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
    /// Upper bound on waiting for a single confirmation
    pub confirm_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&SyncSettings::default())
    }
}

impl From<&SyncSettings> for RetryPolicy {
    fn from(settings: &SyncSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            backoff: settings.backoff.into(),
            confirm_timeout: settings.confirm_timeout(),
        }
    }
}

impl RetryPolicy {
    /// Retry immediately, useful for tests and local devnets.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: BackoffStrategy::None,
            ..Self::default()
        }
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    fn schedule(&self) -> Limited {
        let inner = match self.backoff {
            BackoffStrategy::None => Schedule::Zero(Zero {}),
            BackoffStrategy::Fixed(delay) => Schedule::Constant(Constant::new(delay)),
            BackoffStrategy::Exponential { initial, max } => Schedule::Exponential(
                ExponentialBackoffBuilder::new()
                    .with_initial_interval(initial)
                    .with_max_interval(max)
                    .with_multiplier(2.0)
                    .with_randomization_factor(0.0)
                    .with_max_elapsed_time(None)
                    .build(),
            ),
        };
        Limited {
            inner,
            budget: self.max_attempts.saturating_sub(1),
            remaining: self.max_attempts.saturating_sub(1),
        }
    }
}

/// Result of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    Success { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: E },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Success { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

enum Schedule {
    Zero(Zero),
    Constant(Constant),
    Exponential(ExponentialBackoff),
}

impl Backoff for Schedule {
    fn reset(&mut self) {
        match self {
            Schedule::Zero(b) => b.reset(),
            Schedule::Constant(b) => b.reset(),
            Schedule::Exponential(b) => b.reset(),
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        match self {
            Schedule::Zero(b) => b.next_backoff(),
            Schedule::Constant(b) => b.next_backoff(),
            Schedule::Exponential(b) => b.next_backoff(),
        }
    }
}

/// Stops the inner schedule after `budget` retries.
struct Limited {
    inner: Schedule,
    budget: u32,
    remaining: u32,
}

impl Backoff for Limited {
    fn reset(&mut self) {
        self.remaining = self.budget;
        self.inner.reset();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.inner.next_backoff()
    }
}

/// Run `operation` until it succeeds or the policy runs out of attempts.
///
/// `operation` receives the 1-based attempt number. `label` names the
/// record in log lines.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut operation: F) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let attempts = AtomicU32::new(0);

    let result = backoff::future::retry_notify(
        policy.schedule(),
        || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            let pending = operation(attempt);
            async move { pending.await.map_err(backoff::Error::transient) }
        },
        |err: E, delay: Duration| {
            warn!(record = label, error = %err, retry_in = ?delay, "error, retrying");
        },
    )
    .await;

    let attempts = attempts.load(Ordering::SeqCst);
    match result {
        Ok(value) => RetryOutcome::Success { value, attempts },
        Err(last_error) => RetryOutcome::Exhausted {
            attempts,
            last_error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let policy = RetryPolicy::immediate(5);
        let outcome: RetryOutcome<&str, String> = retry(&policy, "test", |attempt| async move {
            if attempt < 3 {
                Err(format!("failure {attempt}"))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(
            outcome,
            RetryOutcome::Success {
                value: "done",
                attempts: 3
            }
        );
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let policy = RetryPolicy::immediate(4);
        let outcome: RetryOutcome<(), String> =
            retry(&policy, "test", |attempt| async move { Err(format!("failure {attempt}")) }).await;

        assert_eq!(
            outcome,
            RetryOutcome::Exhausted {
                attempts: 4,
                last_error: "failure 4".to_string()
            }
        );
    }

    #[tokio::test]
    async fn single_attempt_policy_never_retries() {
        let policy = RetryPolicy::immediate(1);
        let outcome: RetryOutcome<(), &str> = retry(&policy, "test", |_| async { Err("nope") }).await;
        assert_eq!(outcome.attempts(), 1);
    }

    #[test]
    fn exponential_schedule_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff: BackoffStrategy::Exponential {
                initial: Duration::from_millis(100),
                max: Duration::from_millis(300),
            },
            confirm_timeout: Duration::from_secs(1),
        };
        let mut schedule = policy.schedule();
        let delays: Vec<_> = std::iter::from_fn(|| schedule.next_backoff()).collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300),
                Duration::from_millis(300),
            ]
        );
    }

    #[test]
    fn policy_from_settings() {
        let settings = SyncSettings {
            max_attempts: 7,
            confirm_timeout_secs: 30,
            poll_interval_ms: 100,
            backoff: BackoffSettings::Fixed { delay_ms: 50 },
        };
        let policy = RetryPolicy::from(&settings);
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.backoff, BackoffStrategy::Fixed(Duration::from_millis(50)));
        assert_eq!(policy.confirm_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case(BackoffSettings::None, BackoffStrategy::None)]
    #[case(
        BackoffSettings::Fixed { delay_ms: 250 },
        BackoffStrategy::Fixed(Duration::from_millis(250))
    )]
    #[case(
        BackoffSettings::Exponential { initial_ms: 10, max_ms: 80 },
        BackoffStrategy::Exponential {
            initial: Duration::from_millis(10),
            max: Duration::from_millis(80),
        }
    )]
    fn backoff_settings_map_to_strategy(
        #[case] settings: BackoffSettings,
        #[case] expected: BackoffStrategy,
    ) {
        assert_eq!(BackoffStrategy::from(settings), expected);
    }
}
