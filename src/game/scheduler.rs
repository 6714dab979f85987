//! The one repeating tick task on the game clock.
//!
//! `TickScheduler` holds at most one task handle. Whether a tick is armed
//! is answered by that handle alone: `start` refuses to arm a second task,
//! `cancel` drops it, `rearm` swaps it for one with a new interval.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RepeatingTask {
    interval_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    task: Option<RepeatingTask>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a task firing every `interval_ms`, first at `now_ms + interval_ms`.
    /// Does nothing and returns false if a task is already armed.
    pub fn start(&mut self, interval_ms: u64, now_ms: u64) -> bool {
        if self.task.is_some() {
            return false;
        }
        self.task = Some(Self::task(interval_ms, now_ms));
        true
    }

    /// Replace the armed task with one on the new interval, due a full
    /// interval from `now_ms`. No-op when nothing is armed.
    pub fn rearm(&mut self, interval_ms: u64, now_ms: u64) {
        if let Some(task) = self.task.as_mut() {
            *task = Self::task(interval_ms, now_ms);
        }
    }

    /// Drop the armed task. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.task.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.task.map(|t| t.interval_ms)
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.task.map(|t| t.next_due_ms)
    }

    /// Consume one firing if the task is due at `now_ms`, scheduling the
    /// next one a full interval later. At most one firing per call.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.task.as_mut() {
            Some(task) if task.next_due_ms <= now_ms => {
                task.next_due_ms += task.interval_ms;
                true
            }
            _ => false,
        }
    }

    fn task(interval_ms: u64, now_ms: u64) -> RepeatingTask {
        let interval_ms = interval_ms.max(1);
        RepeatingTask {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_arms_first_fire_one_interval_out() {
        let mut s = TickScheduler::new();
        assert!(s.start(100, 1000));
        assert!(s.is_active());
        assert_eq!(s.next_due_ms(), Some(1100));
        assert!(!s.fire_if_due(1099));
        assert!(s.fire_if_due(1100));
        assert_eq!(s.next_due_ms(), Some(1200));
    }

    #[test]
    fn test_second_start_is_refused() {
        let mut s = TickScheduler::new();
        assert!(s.start(100, 0));
        assert!(!s.start(50, 30));
        // The first task is untouched.
        assert_eq!(s.interval_ms(), Some(100));
        assert_eq!(s.next_due_ms(), Some(100));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut s = TickScheduler::new();
        s.start(100, 0);
        assert!(s.cancel());
        assert!(!s.is_active());
        assert!(!s.fire_if_due(10_000));
        assert!(!s.cancel());
    }

    #[test]
    fn test_fire_if_due_fires_once_per_call() {
        let mut s = TickScheduler::new();
        s.start(100, 0);
        // Three intervals overdue: each call consumes exactly one.
        let fired = (0..5).filter(|_| s.fire_if_due(300)).count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_rearm_replaces_interval() {
        let mut s = TickScheduler::new();
        s.start(150, 0);
        s.rearm(75, 40);
        assert_eq!(s.interval_ms(), Some(75));
        assert_eq!(s.next_due_ms(), Some(115));
    }

    #[test]
    fn test_rearm_without_task_does_not_arm() {
        let mut s = TickScheduler::new();
        s.rearm(75, 0);
        assert!(!s.is_active());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut s = TickScheduler::new();
        s.start(0, 10);
        assert_eq!(s.interval_ms(), Some(1));
        assert_eq!(s.next_due_ms(), Some(11));
    }
}
