//! Browser timers and tasks.

use futures::future::LocalBoxFuture;
use gloo_timers::callback::{Interval, Timeout};
use std::time::Duration;
use study_planner::scheduler::Scheduler;

/// [`Scheduler`] over `setTimeout` / `setInterval` and the microtask queue
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        Timeout::new(millis(delay), callback).forget();
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) {
        Interval::new(millis(period), callback).forget();
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
