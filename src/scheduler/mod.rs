//! Timers and Background Tasks
//!
//! Every deferred action in the UI (clock ticks, toast lifecycle, entrance
//! stagger, network calls started from event handlers) goes through
//! [`Scheduler`]. Nothing is cancellable: once scheduled, a callback runs.
//!
//! - [`ManualScheduler`]: virtual time, advanced explicitly. Tests and demos.
//! - [`TokioScheduler`]: tokio timers on a `LocalSet` (feature `native`).
//! - The browser front-end implements the trait over `gloo-timers`.

mod manual;
#[cfg(feature = "native")]
mod tokio_local;

pub use manual::ManualScheduler;
#[cfg(feature = "native")]
pub use tokio_local::TokioScheduler;

use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Single-threaded timer and task source
pub trait Scheduler {
    /// Run `callback` once after `delay`
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);

    /// Run `callback` every `period`, first after one period
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>);

    /// Drive `task` to completion in the background
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
