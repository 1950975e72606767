use chrono::Utc;

/// Truncates epoch milliseconds to whole-second precision.
#[must_use]
pub fn truncate_to_second(millis: i64) -> i64 {
    millis - millis.rem_euclid(1000)
}

/// Time source used for rolling-window computation.
///
/// Implementations report epoch milliseconds truncated to whole seconds, so
/// repeated reads inside one event-handling turn stay stable.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time source backed by `chrono`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp() * 1000
    }
}

/// Deterministic time source for tests and replay hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now_millis: i64,
}

impl FixedClock {
    /// Creates a fixed clock; the instant is truncated to whole seconds.
    #[must_use]
    pub fn new(now_millis: i64) -> Self {
        Self {
            now_millis: truncate_to_second(now_millis),
        }
    }

    pub fn advance(&mut self, delta_millis: i64) {
        self.now_millis = truncate_to_second(self.now_millis + delta_millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now_millis
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, truncate_to_second};

    #[test]
    fn truncation_floors_to_whole_seconds() {
        assert_eq!(truncate_to_second(1_234), 1_000);
        assert_eq!(truncate_to_second(1_000), 1_000);
        assert_eq!(truncate_to_second(-1_234), -2_000);
    }

    #[test]
    fn fixed_clock_truncates_on_construction_and_advance() {
        let mut clock = FixedClock::new(5_678);
        assert_eq!(clock.now_millis(), 5_000);
        clock.advance(1_500);
        assert_eq!(clock.now_millis(), 6_000);
    }
}
