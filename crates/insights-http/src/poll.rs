//! Polling policy for report generation.

use std::time::Duration;

/// How long to keep polling a report locator that answers 202 Accepted.
///
/// After the first poll, up to `max_retries` further polls are made. Before
/// retry `k` (1-based) the poller waits `k × base_delay`, so waits grow
/// linearly: 10 s, 20 s, 30 s ... with the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub base_delay: Duration,
    pub max_retries: u32,
}

impl PollPolicy {
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(10);
    pub const DEFAULT_MAX_RETRIES: u32 = 8;

    pub fn new(base_delay: Duration, max_retries: u32) -> Self {
        Self {
            base_delay,
            max_retries,
        }
    }

    /// Wait before retry `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Upper bound on requests sent to one locator.
    pub fn max_polls(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sum of every wait when the budget runs out, saturating at
    /// `Duration::MAX`.
    pub fn total_wait(&self) -> Duration {
        (1..=self.max_retries).fold(Duration::ZERO, |total, k| {
            total.saturating_add(self.delay_for(k))
        })
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_DELAY, Self::DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_k_waits_k_times_base() {
        let policy = PollPolicy::default();
        for k in 1..=8 {
            assert_eq!(policy.delay_for(k), Duration::from_secs(10 * k as u64));
        }
    }

    #[test]
    fn delays_never_decrease() {
        let policy = PollPolicy::new(Duration::from_millis(250), 20);
        let delays: Vec<_> = (1..=policy.max_retries).map(|k| policy.delay_for(k)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn default_budget_is_nine_polls() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_polls(), 9);
        assert_eq!(policy.total_wait(), Duration::from_secs(360));
    }

    #[test]
    fn zero_retries_polls_once() {
        let policy = PollPolicy::new(Duration::from_secs(10), 0);
        assert_eq!(policy.max_polls(), 1);
        assert_eq!(policy.total_wait(), Duration::ZERO);
    }

    #[test]
    fn total_wait_saturates_instead_of_overflowing() {
        let policy = PollPolicy::new(Duration::MAX / 2, 4);
        assert_eq!(policy.total_wait(), Duration::MAX);
    }
}
