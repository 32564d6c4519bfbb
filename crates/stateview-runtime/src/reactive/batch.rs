#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While a [`BatchScope`] is alive, every [`Observable`](super::Observable)
//! write stores its value immediately but holds back the notification.
//! Dropping the outermost scope delivers the held notifications in write
//! order, one per observable, carrying its latest value.
//!
//! ```ignore
//! let flag = Observable::new(false);
//! {
//!     let _batch = BatchScope::new();
//!     flag.set(true);
//!     // subscribers have not run yet
//! }
//! // subscribers ran once, seeing `true`
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchContext {
    depth: usize,
    queue: Vec<Task>,
}

thread_local! {
    static BATCH: RefCell<BatchContext> = RefCell::new(BatchContext::default());
}

/// RAII guard that defers observable notifications until dropped.
///
/// Scopes nest; only the outermost one flushes.
#[must_use = "notifications are deferred only while the scope is alive"]
pub struct BatchScope {
    // Tied to the thread-local context.
    _not_send: PhantomData<Rc<()>>,
}

impl BatchScope {
    /// Open a batch scope on the current thread.
    pub fn new() -> Self {
        BATCH.with(|ctx| ctx.borrow_mut().depth += 1);
        Self {
            _not_send: PhantomData,
        }
    }

    /// Current nesting depth (0 when no scope is open).
    #[must_use]
    pub fn depth() -> usize {
        BATCH.with(|ctx| ctx.borrow().depth)
    }

    /// Number of notifications waiting for the outermost scope to close.
    #[must_use]
    pub fn pending() -> usize {
        BATCH.with(|ctx| ctx.borrow().queue.len())
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScope")
            .field("depth", &Self::depth())
            .finish()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let outermost = BATCH.with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            ctx.depth = ctx.depth.saturating_sub(1);
            ctx.depth == 0
        });
        if outermost {
            flush();
        }
    }
}

/// Whether a [`BatchScope`] is open on this thread.
#[must_use]
pub fn is_batching() -> bool {
    BATCH.with(|ctx| ctx.borrow().depth > 0)
}

pub(crate) fn defer(task: impl FnOnce() + 'static) {
    BATCH.with(|ctx| ctx.borrow_mut().queue.push(Box::new(task)));
}

fn flush() {
    loop {
        let tasks = BATCH.with(|ctx| mem::take(&mut ctx.borrow_mut().queue));
        if tasks.is_empty() {
            break;
        }
        tracing::trace!(count = tasks.len(), "flushing batched notifications");
        for task in tasks {
            task();
        }
    }
}
