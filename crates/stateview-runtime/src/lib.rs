#![forbid(unsafe_code)]

//! Runtime primitives for StateView.
//!
//! - [`reactive`]: observable values, change subscriptions, notification
//!   batching and read-only bindings.
//! - [`tick`]: a FIFO of tasks deferred to the next scheduling tick.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and meant to run on
//! the UI's main sequencing context.

pub mod reactive;
pub mod tick;

pub use reactive::{
    BatchScope, Binding, BindingScope, Observable, Subscription, bind_mapped, bind_mapped2,
    bind_observable, is_batching,
};
pub use tick::TickQueue;
