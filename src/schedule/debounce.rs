use std::time::Duration;

use crate::schedule::timers::{TaskId, TaskQueue};

/// Single-flight delay: submitting while a send is pending cancels the
/// pending one, so at most one task is ever live and only the last
/// submission of a burst runs.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TaskId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    pub fn submit<T>(&mut self, queue: &mut TaskQueue<T>, task: T) -> TaskId {
        self.cancel(queue);
        let id = queue.schedule(self.delay, task);
        self.pending = Some(id);
        id
    }

    /// Acknowledge that task `id` is running. Returns false for a task this
    /// debouncer no longer tracks.
    pub fn fired(&mut self, id: TaskId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T>(&mut self, queue: &mut TaskQueue<T>) -> bool {
        match self.pending.take() {
            Some(id) => queue.cancel(id).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_submission() {
        let mut queue = TaskQueue::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        debouncer.submit(&mut queue, 1);
        queue.set_now(Duration::from_millis(20));
        debouncer.submit(&mut queue, 2);
        queue.set_now(Duration::from_millis(40));
        let last = debouncer.submit(&mut queue, 3);

        assert_eq!(queue.len(), 1, "Only one send is ever pending");
        let (id, task) = queue.pop_due(Duration::from_millis(1000)).unwrap();
        assert_eq!(task, 3);
        assert_eq!(id, last);
        assert_eq!(queue.now(), Duration::from_millis(90));
        assert!(debouncer.fired(id));
        assert!(!debouncer.is_pending());
    }
}
