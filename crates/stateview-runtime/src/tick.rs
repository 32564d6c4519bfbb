#![forbid(unsafe_code)]

//! Deferred execution on the next scheduling tick.
//!
//! A [`TickQueue`] is the deterministic stand-in for "run this a moment
//! later". The host's event loop calls [`TickQueue::run_tick`] once after it
//! has dispatched an event; everything deferred while handling that event
//! runs then, after all change notifications the handling produced.
//!
//! # Invariants
//!
//! 1. Tasks run in the order they were deferred.
//! 2. A tick runs only the tasks queued before it started; tasks deferred
//!    from inside a running task wait for the following tick.
//! 3. No task runs while a [`BatchScope`](crate::reactive::BatchScope) is
//!    open on this thread. Held notifications are always delivered first.
//!
//! # Failure Modes
//!
//! - Task panic: propagates out of `run_tick()`. Tasks after it in the same
//!   tick are dropped without running.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::reactive::is_batching;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct TickInner {
    queue: VecDeque<Task>,
    ticks: u64,
}

thread_local! {
    static CURRENT: TickQueue = TickQueue::new();
}

/// Cloneable handle to a FIFO of deferred tasks.
#[derive(Clone, Default)]
pub struct TickQueue {
    inner: Rc<RefCell<TickInner>>,
}

impl TickQueue {
    /// Create an empty, independent queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The thread-local queue shared by components that were not given one.
    #[must_use]
    pub fn current() -> Self {
        CURRENT.with(Clone::clone)
    }

    /// Queue `task` for the next tick.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.inner.borrow_mut().queue.push_back(Box::new(task));
    }

    /// Run one tick. Returns the number of tasks executed.
    pub fn run_tick(&self) -> usize {
        if is_batching() {
            tracing::trace!("tick postponed: notification batch still open");
            return 0;
        }
        let tasks = {
            let mut inner = self.inner.borrow_mut();
            inner.ticks += 1;
            mem::take(&mut inner.queue)
        };
        let count = tasks.len();
        for task in tasks {
            task();
        }
        if count > 0 {
            tracing::trace!(count, "tick ran deferred tasks");
        }
        count
    }

    /// Run ticks until the queue is empty or `max_ticks` ticks have run.
    ///
    /// Returns the total number of tasks executed.
    pub fn run_until_idle(&self, max_ticks: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_ticks {
            if self.pending() == 0 {
                break;
            }
            let ran = self.run_tick();
            if ran == 0 {
                break;
            }
            total += ran;
        }
        total
    }

    /// Number of tasks waiting for a tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Number of ticks run so far, including empty ones.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }

    /// Whether two handles refer to the same queue.
    #[must_use]
    pub fn same_queue(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TickQueue")
            .field("pending", &inner.queue.len())
            .field("ticks", &inner.ticks)
            .finish()
    }
}
