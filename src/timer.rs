use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Schedule of one-second ticks for an active session.
///
/// It only reports when ticks are due. The session owns it and drops it when
/// the session stops, so no tick can outlive the session that armed it.
#[derive(Debug, Clone)]
pub struct Countdown {
    next_tick: Instant,
}

impl Countdown {
    pub fn start(now: Instant) -> Self {
        Self {
            next_tick: now + TICK_INTERVAL,
        }
    }

    /// Number of ticks that have come due by `now`. Advances the schedule past them.
    pub fn take_due_ticks(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next_tick <= now {
            due += 1;
            self.next_tick += TICK_INTERVAL;
        }
        due
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ticks_before_interval() {
        let start = Instant::now();
        let mut countdown = Countdown::start(start);
        assert_eq!(countdown.take_due_ticks(start + Duration::from_millis(999)), 0);
    }

    #[test]
    fn test_ticks_accumulate_when_late() {
        let start = Instant::now();
        let mut countdown = Countdown::start(start);
        assert_eq!(countdown.take_due_ticks(start + Duration::from_millis(3500)), 3);
        assert_eq!(countdown.take_due_ticks(start + Duration::from_millis(3600)), 0);
        assert_eq!(countdown.take_due_ticks(start + Duration::from_secs(4)), 1);
    }

    #[test]
    fn test_time_until_next() {
        let start = Instant::now();
        let countdown = Countdown::start(start);
        assert_eq!(
            countdown.time_until_next(start + Duration::from_millis(400)),
            Duration::from_millis(600)
        );
        assert_eq!(
            countdown.time_until_next(start + Duration::from_secs(2)),
            Duration::ZERO
        );
    }
}
