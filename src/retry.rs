//! Bounded retry with exponential backoff and jitter.
//!
//! Attempt `n` (zero based) of a call is preceded by a delay of
//! `base_delay * 2^n` plus a random jitter in `[0, max_jitter)`. The first
//! attempt is never delayed.

use std::time::Duration;

use bon::Builder;
use rand::Rng as _;
use reqwest::StatusCode;

use crate::error::{Error, Kind};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);

/// How a failed attempt is treated.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Retry if the budget allows it.
    Retry,
    /// Surface the error immediately.
    Abort,
}

/// Retry budget and backoff schedule applied to every call of a client.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Values below 1 behave as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    #[builder(default = DEFAULT_BASE_DELAY)]
    pub base_delay: Duration,
    /// Exclusive upper bound of the random delay added to each backoff.
    #[builder(default = DEFAULT_MAX_JITTER)]
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether a response with `status` on zero-based `attempt` should be
    /// retried. Always false on the last permitted attempt.
    #[must_use]
    pub fn should_retry(&self, status: StatusCode, attempt: u32) -> bool {
        self.permits(classify_status(status), attempt)
    }

    /// Whether the failure of zero-based `attempt` should be retried, for any
    /// kind of failure. Always false on the last permitted attempt.
    #[must_use]
    pub fn should_retry_error(&self, error: &Error, attempt: u32) -> bool {
        self.permits(classify(error), attempt)
    }

    fn permits(&self, disposition: Disposition, attempt: u32) -> bool {
        disposition == Disposition::Retry && attempt.saturating_add(1) < self.attempts()
    }

    /// Delay to wait before zero-based `attempt`, jitter included.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.backoff(attempt).saturating_add(self.jitter())
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2_u32.saturating_pow(attempt))
    }

    fn jitter(&self) -> Duration {
        let bound = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if bound == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..bound))
    }
}

/// 429 and every 5xx are worth retrying. Any other non-success status will
/// fail the same way again.
#[must_use]
pub fn classify_status(status: StatusCode) -> Disposition {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Disposition::Retry
    } else {
        Disposition::Abort
    }
}

/// Classifies the error of a single attempt.
///
/// Network failures and bodies that do not decode are transient. Status
/// errors follow [`classify_status`]. Anything else (a malformed request, an
/// invalid origin) aborts.
#[must_use]
pub fn classify(error: &Error) -> Disposition {
    match error.kind() {
        Kind::Transport | Kind::Decode => Disposition::Retry,
        Kind::Status => error
            .status_code()
            .map_or(Disposition::Abort, classify_status),
        _ => Disposition::Abort,
    }
}
