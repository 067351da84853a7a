//! Time source and deadline-based scheduled tasks.
//!
//! Nothing here spawns a thread or a runtime timer. A task records the
//! wall-clock instant it becomes due; the owner polls with `take_due()`.
//! Tests swap the system clock for a [`ManualClock`] and advance it by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Millisecond time source.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock, milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A single pending action with a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledTask<T> {
    action: T,
    due_at_ms: u64,
}

/// Holds at most one scheduled task. Scheduling replaces, `cancel` drops.
#[derive(Debug, Clone)]
pub struct TaskSlot<T> {
    task: Option<ScheduledTask<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T: Copy> TaskSlot<T> {
    pub fn schedule(&mut self, action: T, now_ms: u64, delay: Duration) {
        self.task = Some(ScheduledTask {
            action,
            due_at_ms: now_ms.saturating_add(delay.as_millis() as u64),
        });
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.task.take().map(|t| t.action)
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    pub fn pending(&self) -> Option<T> {
        self.task.as_ref().map(|t| t.action)
    }

    /// Remove and return the action if its deadline has passed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<T> {
        match &self.task {
            Some(task) if task.due_at_ms <= now_ms => self.task.take().map(|t| t.action),
            _ => None,
        }
    }

    /// Time left until the pending task is due; zero if already due.
    pub fn remaining(&self, now_ms: u64) -> Option<Duration> {
        self.task
            .as_ref()
            .map(|t| Duration::from_millis(t.due_at_ms.saturating_sub(now_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_only_after_deadline() {
        let clock = ManualClock::new();
        let mut slot = TaskSlot::default();
        slot.schedule(7u8, clock.now_ms(), Duration::from_millis(200));

        clock.advance(Duration::from_millis(199));
        assert_eq!(slot.take_due(clock.now_ms()), None);
        assert!(slot.is_pending());

        clock.advance(Duration::from_millis(1));
        assert_eq!(slot.take_due(clock.now_ms()), Some(7));
        assert!(!slot.is_pending());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut slot = TaskSlot::default();
        slot.schedule('a', 1_000, Duration::ZERO);
        assert_eq!(slot.remaining(1_000), Some(Duration::ZERO));
        assert_eq!(slot.take_due(1_000), Some('a'));
    }

    #[test]
    fn cancel_drops_pending_task() {
        let mut slot = TaskSlot::default();
        slot.schedule(1u8, 0, Duration::from_millis(10));
        assert_eq!(slot.cancel(), Some(1));
        assert_eq!(slot.take_due(100), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(Duration::from_secs(1));
        assert_eq!(b.now_ms(), 1_000);
    }
}
