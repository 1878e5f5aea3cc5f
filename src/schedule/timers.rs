use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle of a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Cooperative timer queue driven by an explicit clock.
///
/// Nothing runs on its own: the owner advances time and pops due tasks one
/// at a time, so every task runs to completion before the next starts.
/// Tasks sharing a deadline come out in the order they were scheduled.
#[derive(Debug)]
pub struct TaskQueue<T> {
    now: Duration,
    next_seq: u64,
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<TaskId, Duration>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        TaskQueue {
            now: Duration::ZERO,
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;

        let deadline = self.now + delay;
        self.entries.insert((deadline, seq), task);

        let id = TaskId(seq);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Remove a task before it runs. Returns it if it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.entries.remove(&(deadline, id.0))
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Earliest task due at or before `until`. The clock moves to its
    /// deadline before it is handed out.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, T)> {
        let (&(deadline, seq), _) = self.entries.first_key_value()?;
        if deadline > until {
            return None;
        }

        let task = self.entries.remove(&(deadline, seq))?;
        let id = TaskId(seq);
        self.deadlines.remove(&id);
        if deadline > self.now {
            self.now = deadline;
        }
        Some((id, task))
    }

    /// Move the clock forward without running anything.
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Drop every pending task. Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.deadlines.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        TaskQueue::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn tasks_come_out_in_deadline_then_schedule_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(ms(100), "late");
        queue.schedule(ms(50), "first");
        queue.schedule(ms(50), "second");

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(1000)).map(|(_, t)| t)).collect();
        assert_eq!(order, vec!["first", "second", "late"]);
        assert_eq!(queue.now(), ms(100));
    }

    #[test]
    fn tasks_not_yet_due_stay_queued() {
        let mut queue = TaskQueue::new();
        queue.schedule(ms(100), ());
        assert!(queue.pop_due(ms(99)).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(ms(100)).is_some());
    }

    #[test]
    fn cancelled_tasks_never_run() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule(ms(10), "gone");
        queue.schedule(ms(20), "kept");

        assert_eq!(queue.cancel(id), Some("gone"));
        assert_eq!(queue.cancel(id), None, "Second cancel is a no-op");
        assert!(!queue.is_scheduled(id));
        assert_eq!(queue.pop_due(ms(100)).map(|(_, t)| t), Some("kept"));
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut queue = TaskQueue::new();
        queue.set_now(ms(500));
        queue.schedule(ms(50), ());
        assert!(queue.pop_due(ms(549)).is_none());
        assert!(queue.pop_due(ms(550)).is_some());
    }
}
