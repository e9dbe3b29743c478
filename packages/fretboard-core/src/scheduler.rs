//! # Virtual Scheduler
//!
//! Deterministic millisecond clock with a queue of one-shot tasks.
//!
//! The scheduler never calls anything by itself. Whoever drives the game (a
//! terminal loop, a browser `setInterval`, a test) reports elapsed time through
//! [`VirtualScheduler::advance`] and receives the ids of due tasks, which it hands
//! to the session.
//!
//! ## Ordering
//! - Tasks fire in due-time order; equal due times fire in scheduling order
//! - Before each task fires, virtual time moves to that task's due time, so a task
//!   re-armed from inside the callback is measured from when it was due, not from
//!   the end of the advance window
//! - Tasks scheduled during an advance that fall inside the window fire in the same
//!   advance
//!
//! Clones share one queue, so the driver can keep a handle after giving the
//! session its own.

use crate::ports::{Scheduler, TaskId};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    inner: Rc<RefCell<Queue>>,
}

#[derive(Debug, Default)]
struct Queue {
    now_ms: u64,
    next_id: u64,
    /// (due_ms, id) so iteration is due-time then scheduling order
    pending: BTreeSet<(u64, u64)>,
}

impl Queue {
    fn pop_due(&mut self, until_ms: u64) -> Option<TaskId> {
        let &(due, id) = self.pending.iter().next()?;
        if due > until_ms {
            return None;
        }
        self.pending.remove(&(due, id));
        self.now_ms = self.now_ms.max(due);
        Some(TaskId(id))
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the virtual clock
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.inner.borrow().pending.iter().any(|&(_, pending)| pending == id.0)
    }

    /// Move the clock forward by `elapsed`, invoking `fire` for every task that
    /// becomes due, including ones scheduled by `fire` itself.
    pub fn advance(&self, elapsed: Duration, mut fire: impl FnMut(TaskId)) {
        let until = self.now_ms() + elapsed.as_millis() as u64;
        loop {
            // The borrow ends before `fire` runs so the callback may schedule
            let next = self.inner.borrow_mut().pop_due(until);
            match next {
                Some(id) => fire(id),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = until;
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskId {
        let mut queue = self.inner.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now_ms + delay.as_millis() as u64;
        queue.pending.insert((due, id));
        TaskId(id)
    }

    fn cancel(&mut self, id: TaskId) {
        self.inner.borrow_mut().pending.retain(|&(_, pending)| pending != id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut scheduler = VirtualScheduler::new();
        let late = scheduler.schedule(Duration::from_millis(300));
        let early = scheduler.schedule(Duration::from_millis(100));
        let tie = scheduler.schedule(Duration::from_millis(100));

        let mut fired = Vec::new();
        scheduler.advance(Duration::from_millis(250), |id| fired.push(id));
        assert_eq!(fired, vec![early, tie]);
        assert_eq!(scheduler.now_ms(), 250);

        scheduler.advance(Duration::from_millis(50), |id| fired.push(id));
        assert_eq!(fired, vec![early, tie, late]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_cancelled_tasks_never_fire() {
        let mut scheduler = VirtualScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(10));
        assert!(scheduler.is_pending(id));
        scheduler.cancel(id);
        assert!(!scheduler.is_pending(id));

        let mut fired = Vec::new();
        scheduler.advance(Duration::from_secs(1), |id| fired.push(id));
        assert!(fired.is_empty());
    }

    #[test]
    fn test_rearmed_task_measured_from_due_time() {
        let scheduler = VirtualScheduler::new();
        let mut handle = scheduler.clone();
        handle.schedule(Duration::from_millis(1000));

        let mut fire_times = Vec::new();
        scheduler.advance(Duration::from_millis(3500), |_| {
            fire_times.push(handle.now_ms());
            handle.schedule(Duration::from_millis(1000));
        });
        assert_eq!(fire_times, vec![1000, 2000, 3000]);
        assert_eq!(scheduler.now_ms(), 3500);
        assert_eq!(scheduler.pending_count(), 1);
    }
}
