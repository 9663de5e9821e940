//! The designated UI execution context.
//!
//! A [`UiExecutor`] is the explicit stand-in for a platform main loop: work
//! can be posted to run on a later turn, and the executor knows which thread
//! it belongs to. [`MainQueue`] is a deterministic implementation that only
//! runs tasks when [`MainQueue::run_pending`] is called, which is what a host
//! event loop (or a test) does once per turn.
//!
//! # Invariants
//!
//! 1. Tasks run in the order they were posted (FIFO).
//! 2. No internal borrow is held while a task runs, so tasks may post more
//!    tasks; those run in the same `run_pending` call, after the tasks that
//!    were already queued.
//! 3. A task never runs inside the `post` call that enqueued it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::thread::ThreadAffinityGuard;

/// Unit of deferred work.
pub type Task = Box<dyn FnOnce() + 'static>;

/// A single-threaded execution context that accepts deferred work.
pub trait UiExecutor {
    /// Schedule `task` for a later turn of this context.
    fn post(&self, task: Task);

    /// The thread this context runs on.
    fn guard(&self) -> &ThreadAffinityGuard;
}

/// FIFO task queue driven explicitly by its owner.
///
/// Cloning produces another handle to the same queue.
#[derive(Clone)]
pub struct MainQueue {
    inner: Rc<QueueInner>,
}

struct QueueInner {
    guard: ThreadAffinityGuard,
    tasks: RefCell<VecDeque<Task>>,
}

impl MainQueue {
    /// Create a queue designated to the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self::with_guard(ThreadAffinityGuard::current())
    }

    /// Create a queue designated to the guard's thread.
    #[must_use]
    pub fn with_guard(guard: ThreadAffinityGuard) -> Self {
        Self {
            inner: Rc::new(QueueInner {
                guard,
                tasks: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.tasks.borrow().len()
    }

    /// Run queued tasks until the queue is empty. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Pop in its own statement so the borrow ends before the task runs.
            let next = self.inner.tasks.borrow_mut().pop_front();
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        #[cfg(feature = "tracing")]
        if ran > 0 {
            tracing::trace!(ran, "main queue drained");
        }
        ran
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiExecutor for MainQueue {
    fn post(&self, task: Task) {
        self.inner.tasks.borrow_mut().push_back(task);
    }

    fn guard(&self) -> &ThreadAffinityGuard {
        &self.inner.guard
    }
}

impl fmt::Debug for MainQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainQueue")
            .field("designated", &self.inner.guard.designated())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn post_does_not_run_inline() {
        let queue = MainQueue::new();
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        queue.post(Box::new(move || r.set(true)));
        assert!(!ran.get());
        assert_eq!(queue.pending(), 1);

        assert_eq!(queue.run_pending(), 1);
        assert!(ran.get());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        let queue = MainQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..4 {
            let l = Rc::clone(&log);
            queue.post(Box::new(move || l.borrow_mut().push(i)));
        }
        queue.run_pending();
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn tasks_may_post_more_tasks() {
        let queue = MainQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let q = queue.clone();
        let l = Rc::clone(&log);
        queue.post(Box::new(move || {
            l.borrow_mut().push("outer");
            let l2 = Rc::clone(&l);
            q.post(Box::new(move || l2.borrow_mut().push("inner")));
        }));
        let l = Rc::clone(&log);
        queue.post(Box::new(move || l.borrow_mut().push("second")));

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*log.borrow(), vec!["outer", "second", "inner"]);
    }

    #[test]
    fn run_pending_on_empty_queue_is_noop() {
        let queue = MainQueue::new();
        assert_eq!(queue.run_pending(), 0);
    }

    #[test]
    fn guard_reflects_designation() {
        let queue = MainQueue::new();
        assert!(queue.guard().is_designated());
        let debug = format!("{queue:?}");
        assert!(debug.contains("pending: 0"));
    }
}
