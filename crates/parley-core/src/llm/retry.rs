//! Bounded retry with exponential backoff for rate-limited model calls.
//!
//! The executor owns the transient/permanent distinction: transient failures
//! are retried after a backoff of `base * 2^attempt`, permanent failures and
//! the final transient failure propagate immediately. What counts as
//! transient is decided by an injected [`TransientClassifier`], so the loop
//! does not change when the upstream client reports errors differently.
//!
//! Backoff waits use `tokio::time::sleep`, which suspends only the calling
//! task; other requests keep running on the runtime meanwhile.

use std::future::Future;
use std::time::Duration;

use parley_types::config::RetrySettings;
use parley_types::llm::LlmError;
use tracing::{debug, warn};

/// Message fragments that identify rate limiting in free-text errors.
pub const RATE_LIMIT_MARKERS: [&str; 3] = ["429", "Too Many Requests", "RESOURCE_EXHAUSTED"];

/// Structured reason code some transports use for quota exhaustion.
pub const RATE_LIMIT_REASON: &str = "RESOURCE_EXHAUSTED";

/// HTTP status for rate limiting.
pub const RATE_LIMIT_STATUS: u16 = 429;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The signals an error exposes for classification.
///
/// Each is optional because transports surface rate limiting inconsistently:
/// some as an HTTP status, some as a structured reason, some only in text.
pub trait ErrorSignals {
    fn status(&self) -> Option<u16>;
    fn reason(&self) -> Option<&str>;
    fn message(&self) -> String;
}

impl ErrorSignals for LlmError {
    fn status(&self) -> Option<u16> {
        LlmError::status(self)
    }

    fn reason(&self) -> Option<&str> {
        LlmError::reason(self)
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

/// Decides whether a failure is worth retrying.
pub trait TransientClassifier<E>: Send + Sync {
    fn is_transient(&self, error: &E) -> bool;
}

/// Any `Fn(&E) -> bool` closure is a classifier.
impl<E, F> TransientClassifier<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn is_transient(&self, error: &E) -> bool {
        self(error)
    }
}

/// Treats rate limiting as transient, whichever signal reports it.
///
/// An error is transient when its status is 429, its reason is
/// `RESOURCE_EXHAUSTED`, or its message contains any of
/// [`RATE_LIMIT_MARKERS`]. Everything else is permanent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitClassifier;

impl<E: ErrorSignals> TransientClassifier<E> for RateLimitClassifier {
    fn is_transient(&self, error: &E) -> bool {
        if error.status() == Some(RATE_LIMIT_STATUS) {
            return true;
        }
        if error.reason() == Some(RATE_LIMIT_REASON) {
            return true;
        }
        let message = error.message();
        RATE_LIMIT_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    }
}

// ---------------------------------------------------------------------------
// Policy and state
// ---------------------------------------------------------------------------

/// How many attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Backoff base; the wait after failed attempt `n` is `base * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_millis(5000),
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            base_delay: Duration::from_millis(settings.base_delay_ms),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Wait before the attempt following failed attempt `attempt` (1-based).
    ///
    /// Saturates instead of overflowing for very large attempt numbers.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Progress through one invocation's attempts.
///
/// Lives only for the duration of a single [`RetryExecutor::execute`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub attempt: u32,
    pub max_attempts: u32,
}

impl RetryState {
    fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 1,
            max_attempts: max_attempts.max(1),
        }
    }

    fn has_attempts_left(&self) -> bool {
        self.attempt < self.max_attempts
    }

    fn advance(&mut self) {
        self.attempt += 1;
    }
}

/// Final failure of a retried operation.
#[derive(Debug)]
pub struct RetryError<E> {
    /// The error from the last attempt made.
    pub last_error: E,
    /// Number of attempts made, including the last.
    pub attempts: u32,
    /// Whether the last error was classified transient, i.e. retries ran out.
    pub transient: bool,
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation failed after {} attempt(s): {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for RetryError<E> {}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Runs an async operation with bounded retry on transient failures.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor<C = RateLimitClassifier> {
    policy: RetryPolicy,
    classifier: C,
}

impl RetryExecutor<RateLimitClassifier> {
    /// Executor that retries rate-limit errors only.
    pub fn rate_limited(policy: RetryPolicy) -> Self {
        Self::new(policy, RateLimitClassifier)
    }
}

impl<C> RetryExecutor<C> {
    pub fn new(policy: RetryPolicy, classifier: C) -> Self {
        Self { policy, classifier }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of
    /// attempts.
    ///
    /// `operation` is invoked at most `max_attempts` times. A success or a
    /// non-transient error ends the loop at once; a transient error waits
    /// [`RetryPolicy::delay_after`] and tries again while attempts remain.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: TransientClassifier<E>,
        E: std::fmt::Display,
    {
        let mut state = RetryState::new(self.policy.max_attempts);

        loop {
            match operation().await {
                Ok(value) => {
                    if state.attempt > 1 {
                        debug!(attempt = state.attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    let transient = self.classifier.is_transient(&error);

                    if transient && state.has_attempts_left() {
                        let delay = self.policy.delay_after(state.attempt);
                        warn!(
                            attempt = state.attempt,
                            max_attempts = state.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "Rate limited, backing off before retry"
                        );
                        tokio::time::sleep(delay).await;
                        state.advance();
                        continue;
                    }

                    debug!(
                        attempt = state.attempt,
                        transient,
                        error = %error,
                        "Operation failed, no more retries"
                    );
                    return Err(RetryError {
                        last_error: error,
                        attempts: state.attempt,
                        transient,
                    });
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
