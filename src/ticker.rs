//! Gravity timer
//!
//! A single recurring timer driven by injected elapsed time. The game loop
//! feeds it frame deltas; tests feed it whatever they like.

use std::time::Duration;

/// Recurring tick with an accumulator and a cancel switch
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulated: Duration,
    active: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            active: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Add `elapsed` and report whether a tick is due.
    /// Fires at most once per call; the accumulator restarts from zero.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Start the current interval over
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Stop ticking until `restart`
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn restart(&mut self) {
        self.active = true;
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_on_interval() {
        let mut ticker = Ticker::new(100 * MS);
        assert!(!ticker.advance(60 * MS));
        assert!(ticker.advance(40 * MS));
        // Accumulator starts over
        assert!(!ticker.advance(99 * MS));
        assert!(ticker.advance(MS));
    }

    #[test]
    fn test_one_tick_per_advance() {
        let mut ticker = Ticker::new(100 * MS);
        assert!(ticker.advance(1000 * MS));
        assert!(!ticker.advance(Duration::ZERO));
    }

    #[test]
    fn test_reset() {
        let mut ticker = Ticker::new(100 * MS);
        ticker.advance(90 * MS);
        ticker.reset();
        assert!(!ticker.advance(90 * MS));
    }

    #[test]
    fn test_cancel_is_immediate() {
        let mut ticker = Ticker::new(100 * MS);
        ticker.advance(99 * MS);
        ticker.cancel();
        assert!(!ticker.is_active());
        assert!(!ticker.advance(1000 * MS));

        ticker.restart();
        assert!(ticker.is_active());
        assert!(!ticker.advance(99 * MS));
        assert!(ticker.advance(MS));
    }
}
