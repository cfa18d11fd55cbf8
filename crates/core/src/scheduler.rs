//! Deferred work keyed by cancellable handles.
//!
//! Everything runs on one event loop, so this is bookkeeping rather than a
//! runtime: the host either maps each scheduled task onto a real timer and
//! calls [`Scheduler::take`] when it expires, or advances a clock and drains
//! [`Scheduler::pop_due`]. Both paths agree on the same pending set, so a
//! task fires at most once and never after it was cancelled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    pending: HashMap<TaskId, T>,
    // Ordered by due time, then by scheduling order. Entries whose id is no
    // longer pending are skipped on pop and swept by `compact`.
    queue: BinaryHeap<Reverse<(u64, TaskId)>>,
}

// Stale heap entries tolerated before a sweep.
const COMPACT_SLACK: usize = 32;

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
            queue: BinaryHeap::new(),
        }
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u32, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due_ms = now_ms.saturating_add(delay_ms as u64);
        self.pending.insert(id, task);
        self.queue.push(Reverse((due_ms, id)));
        id
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.take(id).is_some()
    }

    /// Removes and returns a pending task regardless of its due time.
    pub fn take(&mut self, id: TaskId) -> Option<T> {
        let task = self.pending.remove(&id);
        self.compact();
        task
    }

    // Hosts that fire through `take` never pop the heap, so drop entries
    // whose task is gone once they outnumber the live ones.
    fn compact(&mut self) {
        if self.queue.len() <= 2 * self.pending.len() + COMPACT_SLACK {
            return;
        }
        let pending = &self.pending;
        self.queue.retain(|Reverse((_, id))| pending.contains_key(id));
    }

    /// Pops the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TaskId, T)> {
        while let Some(Reverse((due_ms, id))) = self.queue.peek().copied() {
            if due_ms > now_ms {
                return None;
            }
            self.queue.pop();
            if let Some(task) = self.pending.remove(&id) {
                return Some((id, task));
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancels everything, returning the ids that were pending.
    pub fn drain_ids(&mut self) -> Vec<TaskId> {
        self.queue.clear();
        let mut ids: Vec<TaskId> = self.pending.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        ids
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order_not_call_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 2500, "slow");
        s.schedule(0, 1200, "fast");
        assert!(s.pop_due(1000).is_none());
        assert_eq!(s.pop_due(3000).map(|(_, t)| t), Some("fast"));
        assert_eq!(s.pop_due(3000).map(|(_, t)| t), Some("slow"));
        assert!(s.is_empty());
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 100, 1);
        s.schedule(0, 100, 2);
        assert_eq!(s.pop_due(100).map(|(_, t)| t), Some(1));
        assert_eq!(s.pop_due(100).map(|(_, t)| t), Some(2));
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut s = Scheduler::new();
        let a = s.schedule(0, 10, 'a');
        s.schedule(0, 20, 'b');
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.pop_due(100).map(|(_, t)| t), Some('b'));
        assert!(s.pop_due(100).is_none());
    }

    #[test]
    fn take_consumes_once() {
        let mut s = Scheduler::new();
        let id = s.schedule(0, 5_000, ());
        assert!(s.take(id).is_some());
        assert!(s.take(id).is_none());
        assert!(s.pop_due(10_000).is_none());
    }

    #[test]
    fn queue_stays_bounded_when_tasks_are_taken() {
        let mut s = Scheduler::new();
        let keep = s.schedule(0, 60_000, 0u32);
        for round in 1..=10_000u32 {
            let id = s.schedule(round as u64, 1_000, round);
            assert_eq!(s.take(id), Some(round));
        }
        assert_eq!(s.len(), 1);
        assert!(s.queue.len() <= 2 + COMPACT_SLACK);

        for round in 0..10_000u64 {
            let id = s.schedule(round, 1_000, 0);
            assert!(s.cancel(id));
        }
        assert!(s.queue.len() <= 2 + COMPACT_SLACK);
        assert_eq!(s.pop_due(60_000).map(|(id, _)| id), Some(keep));
    }

    #[test]
    fn drain_ids_reports_everything_pending() {
        let mut s = Scheduler::new();
        let a = s.schedule(0, 1, ());
        let b = s.schedule(0, 2, ());
        assert_eq!(s.drain_ids(), vec![a, b]);
        assert!(s.is_empty());
        assert!(s.pop_due(u64::MAX).is_none());
    }
}
