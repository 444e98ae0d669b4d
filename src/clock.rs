//! Monotonic elapsed-time accounting.

use std::time::{Duration, Instant};

/// Elapsed time built from a running segment plus time banked before it.
///
/// While running, elapsed is `now - epoch + accumulated`. While paused the
/// running segment has been folded into `accumulated`, which is the frozen value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedClock {
    epoch: Instant,
    accumulated: Duration,
}

impl ElapsedClock {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            epoch: now,
            accumulated: Duration::ZERO,
        }
    }

    /// Elapsed time at `now`. `running` selects live versus frozen accounting.
    #[must_use]
    pub fn elapsed(&self, now: Instant, running: bool) -> Duration {
        if running {
            now.saturating_duration_since(self.epoch) + self.accumulated
        } else {
            self.accumulated
        }
    }

    /// Stop the running segment, banking it. Returns the frozen value.
    pub fn freeze(&mut self, now: Instant) -> Duration {
        self.accumulated = self.elapsed(now, true);
        self.epoch = now;
        self.accumulated
    }

    /// Start a new running segment from the frozen value.
    pub fn resume(&mut self, now: Instant) {
        self.epoch = now;
    }

    /// Zero the clock. A running clock keeps counting from `now`.
    pub fn rezero(&mut self, now: Instant) {
        self.epoch = now;
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_clock_counts_from_epoch() {
        let start = Instant::now();
        let clock = ElapsedClock::new(start);
        assert_eq!(clock.elapsed(start, true), Duration::ZERO);
        assert_eq!(
            clock.elapsed(start + Duration::from_secs(5), true),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn elapsed_never_goes_backwards_while_running() {
        let start = Instant::now();
        let clock = ElapsedClock::new(start);
        let mut last = Duration::ZERO;
        for ms in (0..5_000).step_by(37) {
            let sample = clock.elapsed(start + Duration::from_millis(ms), true);
            assert!(sample >= last);
            last = sample;
        }
    }

    #[test]
    fn sample_before_epoch_saturates_to_banked_time() {
        let start = Instant::now();
        let clock = ElapsedClock::new(start + Duration::from_secs(1));
        assert_eq!(clock.elapsed(start, true), Duration::ZERO);
    }

    #[test]
    fn pause_and_resume_do_not_count_the_pause() {
        let start = Instant::now();
        let mut clock = ElapsedClock::new(start);
        let paused_at = start + Duration::from_millis(12_345);
        let frozen = clock.freeze(paused_at);
        assert_eq!(frozen, Duration::from_millis(12_345));

        let resumed_at = paused_at + Duration::from_secs(600);
        assert_eq!(clock.elapsed(resumed_at, false), frozen);
        clock.resume(resumed_at);
        assert_eq!(clock.elapsed(resumed_at, true), frozen);
        assert_eq!(
            clock.elapsed(resumed_at + Duration::from_secs(2), true),
            frozen + Duration::from_secs(2)
        );
    }

    #[test]
    fn rezero_drops_banked_time() {
        let start = Instant::now();
        let mut clock = ElapsedClock::new(start);
        clock.freeze(start + Duration::from_secs(30));
        let later = start + Duration::from_secs(40);
        clock.rezero(later);
        assert_eq!(clock.elapsed(later, false), Duration::ZERO);
        assert_eq!(
            clock.elapsed(later + Duration::from_secs(1), true),
            Duration::from_secs(1)
        );
    }
}
