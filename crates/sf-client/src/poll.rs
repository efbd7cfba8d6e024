//! Bounded polling with configurable backoff.
//!
//! Asynchronous Salesforce work (batch Apex, anonymous Apex) is observed by
//! re-querying its status. [`poll_until`] runs a probe up to
//! `max_attempts` times and sleeps between attempts according to a
//! [`BackoffStrategy`]. The default configuration polls 29 times with
//! linear delays of 1s, 2s, ... 29s, for at most 435s of waiting.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Configuration for a polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of probes.
    pub max_attempts: u32,
    /// Delay after the first pending probe.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// How delays grow between probes.
    pub backoff: BackoffStrategy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 29,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff: BackoffStrategy::Linear,
        }
    }
}

impl PollConfig {
    /// Set the maximum number of probes.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay after the first pending probe.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the cap for a single delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay to sleep after the pending probe numbered `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff
            .delay(attempt.saturating_sub(1), self.initial_delay, self.max_delay)
    }

    /// Worst-case total sleep when every probe is pending.
    pub fn total_wait(&self) -> Duration {
        (1..=self.max_attempts).map(|a| self.delay_after(a)).sum()
    }
}

/// Backoff strategy for determining delays between probes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffStrategy {
    /// Constant delay between probes.
    Constant,
    /// Linear increase in delay (delay * attempt).
    Linear,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let delay = match self {
            BackoffStrategy::Constant => initial_delay,
            BackoffStrategy::Linear => initial_delay.saturating_mul(attempt.saturating_add(1)),
            BackoffStrategy::Exponential { factor } => {
                let multiplier = factor.powi(attempt.min(i32::MAX as u32) as i32);
                Duration::try_from_secs_f64(initial_delay.as_secs_f64() * multiplier)
                    .unwrap_or(max_delay)
            }
        };

        std::cmp::min(delay, max_delay)
    }
}

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe<T> {
    /// The awaited condition holds; stop polling.
    Ready(T),
    /// Not there yet; sleep and probe again.
    Pending,
}

/// What a polling loop ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome<T> {
    /// The ready value, or `None` if attempts ran out.
    pub value: Option<T>,
    /// Number of probes made.
    pub attempts: u32,
    /// Total time slept.
    pub waited: Duration,
}

impl<T> PollOutcome<T> {
    pub fn is_ready(&self) -> bool {
        self.value.is_some()
    }
}

/// Probe until it reports [`Probe::Ready`] or `config.max_attempts` is reached.
///
/// The probe receives the 1-based attempt number. After every pending probe
/// (including the last) the loop sleeps `config.delay_after(attempt)`. A
/// probe error aborts the loop and is returned as is.
pub async fn poll_until<T, E, F, Fut>(
    config: &PollConfig,
    mut probe: F,
) -> std::result::Result<PollOutcome<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<Probe<T>, E>>,
{
    let mut waited = Duration::ZERO;

    for attempt in 1..=config.max_attempts {
        if let Probe::Ready(value) = probe(attempt).await? {
            return Ok(PollOutcome {
                value: Some(value),
                attempts: attempt,
                waited,
            });
        }

        let delay = config.delay_after(attempt);
        debug!(attempt, delay_ms = delay.as_millis() as u64, "Probe pending");
        tokio::time::sleep(delay).await;
        waited += delay;
    }

    Ok(PollOutcome {
        value: None,
        attempts: config.max_attempts,
        waited,
    })
}
