use std::time::Duration;

/// Bounded exponential backoff used while a report is being generated.
///
/// The first check happens after `initial_delay`; each following delay
/// doubles up to `max_delay`. The sum of all delays never exceeds `timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    initial_delay: Duration,
    max_delay: Duration,
    timeout: Duration,
}

impl PollPolicy {
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(10);
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    const MIN_DELAY: Duration = Duration::from_millis(1);

    pub fn new(initial_delay: Duration, max_delay: Duration, timeout: Duration) -> Self {
        // A zero delay would never advance the schedule
        let initial_delay = initial_delay.max(Self::MIN_DELAY);
        Self {
            initial_delay,
            max_delay: max_delay.max(initial_delay),
            timeout,
        }
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delays to wait before each readiness check
    pub fn schedule(&self) -> PollSchedule {
        PollSchedule {
            next_delay: self.initial_delay,
            max_delay: self.max_delay,
            remaining: self.timeout,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_INITIAL_DELAY,
            Self::DEFAULT_MAX_DELAY,
            Self::DEFAULT_TIMEOUT,
        )
    }
}

/// Iterator over the delays of a `PollPolicy`
#[derive(Debug, Clone)]
pub struct PollSchedule {
    next_delay: Duration,
    max_delay: Duration,
    remaining: Duration,
}

impl Iterator for PollSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.remaining.is_zero() {
            return None;
        }

        let delay = self.next_delay.min(self.remaining);
        self.remaining -= delay;
        self.next_delay = (self.next_delay * 2).min(self.max_delay);
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs).collect()
    }

    #[test]
    fn test_schedule_doubles_up_to_max_delay() {
        let policy = PollPolicy::new(
            Duration::from_secs(5),
            Duration::from_secs(30),
            Duration::from_secs(120),
        );
        let delays: Vec<Duration> = policy.schedule().collect();
        assert_eq!(delays, secs(&[5, 10, 20, 30, 30, 25]));
    }

    #[test]
    fn test_schedule_never_exceeds_timeout() {
        let policy = PollPolicy::new(
            Duration::from_secs(7),
            Duration::from_secs(60),
            Duration::from_secs(100),
        );
        let total: Duration = policy.schedule().sum();
        assert_eq!(total, Duration::from_secs(100));
    }

    #[test]
    fn test_schedule_with_zero_timeout_is_empty() {
        let policy = PollPolicy::new(Duration::from_secs(5), Duration::from_secs(5), Duration::ZERO);
        assert_eq!(policy.schedule().count(), 0);
    }

    #[test]
    fn test_zero_initial_delay_is_clamped() {
        let policy = PollPolicy::new(Duration::ZERO, Duration::ZERO, Duration::from_millis(3));
        assert_eq!(policy.initial_delay(), Duration::from_millis(1));
        assert_eq!(policy.max_delay(), Duration::from_millis(1));
        assert_eq!(policy.schedule().count(), 3);
    }

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.initial_delay(), Duration::from_secs(10));
        assert_eq!(policy.max_delay(), Duration::from_secs(30));
        assert_eq!(policy.timeout(), Duration::from_secs(300));
    }
}
