//! Repeating schedules on the simulation clock

use serde::{Deserialize, Serialize};

/// A fixed-period repeating timer.
///
/// Fires at `start + period`, `start + 2 * period`, ... Each firing reports its
/// scheduled time, not the time it was polled at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    period_ms: f64,
    next_due_ms: f64,
}

impl Interval {
    pub fn new(period_ms: f64, start_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    /// Scheduled time of the next firing
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    /// Fire once if due at or before `now_ms`, returning the scheduled time
    pub fn poll(&mut self, now_ms: f64) -> Option<f64> {
        if self.next_due_ms > now_ms {
            return None;
        }
        let due = self.next_due_ms;
        self.next_due_ms += self.period_ms;
        Some(due)
    }

    /// Stop firing for good
    pub fn cancel(&mut self) {
        self.next_due_ms = f64::INFINITY;
    }

    pub fn is_cancelled(&self) -> bool {
        self.next_due_ms == f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_on_schedule() {
        let mut timer = Interval::new(1500.0, 0.0);
        assert_eq!(timer.poll(1499.0), None);
        assert_eq!(timer.poll(1500.0), Some(1500.0));
        assert_eq!(timer.poll(1500.0), None);
        assert_eq!(timer.next_due_ms(), 3000.0);
    }

    #[test]
    fn test_interval_catches_up() {
        let mut timer = Interval::new(50.0, 0.0);
        let fired: Vec<f64> = std::iter::from_fn(|| timer.poll(175.0)).collect();
        assert_eq!(fired, vec![50.0, 100.0, 150.0]);
    }

    #[test]
    fn test_cancelled_interval_never_fires() {
        let mut timer = Interval::new(50.0, 0.0);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.poll(1.0e12), None);
    }
}
