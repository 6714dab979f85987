//! Wall-clock to game-clock conversion for the frame loop.

use std::time::{Duration, Instant};

/// Hands out elapsed wall time in whole milliseconds. The sub-millisecond
/// remainder stays on the clock for the next frame, so the total never
/// falls behind real time.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new(start: Instant) -> Self {
        Self { last: start }
    }

    /// Whole milliseconds since the previous call (or since `new`).
    pub fn elapsed_ms(&mut self, now: Instant) -> u64 {
        let dt_ms = now.saturating_duration_since(self.last).as_millis() as u64;
        self.last += Duration::from_millis(dt_ms);
        dt_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_carries_over() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let frame = Duration::from_micros(10_700);

        let total: u64 = (1..=56).map(|i| clock.elapsed_ms(start + frame * i)).sum();
        // 56 * 10.7ms = 599.2ms of wall time.
        assert_eq!(total, 599);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.elapsed_ms(start + Duration::from_micros(600)), 0);
        assert_eq!(clock.elapsed_ms(start + Duration::from_micros(1_200)), 1);
        assert_eq!(clock.elapsed_ms(start + Duration::from_micros(1_900)), 0);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new(start);
        assert_eq!(clock.elapsed_ms(start - Duration::from_millis(5)), 0);
    }
}
