//! Delayed work, promoted when the host ticks past its due time.

use chrono::{DateTime, Utc};

/// Work the bridge can defer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Move keyboard focus into the composer input once it is on screen.
    FocusComposer,
}

#[derive(Debug)]
struct Scheduled {
    due: DateTime<Utc>,
    seq: u64,
    task: DeferredTask,
}

/// Tasks keyed by due time. Ties run in scheduling order.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    scheduled: Vec<Scheduled>,
    next_seq: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: DateTime<Utc>, task: DeferredTask) {
        self.scheduled.push(Scheduled {
            due,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return every task due at or before `now`.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<DeferredTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|s| s.due <= now);
        self.scheduled = pending;
        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.scheduled.iter().map(|s| s.due).min()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.scheduled.len();
        self.scheduled.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(millis)
    }

    #[test]
    fn test_nothing_due_before_time() {
        let mut queue = DeferredQueue::new();
        queue.schedule(at(50), DeferredTask::FocusComposer);

        assert!(queue.take_due(at(49)).is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(at(50)));
    }

    #[test]
    fn test_due_exactly_at_time_runs_once() {
        let mut queue = DeferredQueue::new();
        queue.schedule(at(50), DeferredTask::FocusComposer);

        assert_eq!(queue.take_due(at(50)), vec![DeferredTask::FocusComposer]);
        assert!(queue.take_due(at(500)).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_only_due_tasks_are_taken() {
        let mut queue = DeferredQueue::new();
        queue.schedule(at(100), DeferredTask::FocusComposer);
        queue.schedule(at(10), DeferredTask::FocusComposer);

        assert_eq!(queue.take_due(at(20)).len(), 1);
        assert_eq!(queue.next_due(), Some(at(100)));
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = DeferredQueue::new();
        queue.schedule(at(10), DeferredTask::FocusComposer);
        queue.schedule(at(20), DeferredTask::FocusComposer);

        assert_eq!(queue.cancel_all(), 2);
        assert!(queue.take_due(at(1_000)).is_empty());
        assert_eq!(queue.next_due(), None);
    }
}
