use jiff::Timestamp;

pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

/// Wall clock truncated to whole seconds.
///
/// Creation timestamps are stored at second precision, so every backend
/// round-trips the exact value the clock handed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = Timestamp::now();
        Timestamp::from_second(now.as_second()).unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_no_subsecond_part() {
        let now = SystemClock.now();
        assert_eq!(now.subsec_nanosecond(), 0);
        assert!(now.to_string().ends_with('Z'));
    }
}
