//! Tokio-backed scheduler for native runs.

use futures::future::LocalBoxFuture;
use std::time::Duration;

use super::Scheduler;

/// Scheduler over `tokio::time` and `spawn_local`.
///
/// Callbacks and tasks are `!Send`, so everything is spawned onto the current
/// [`tokio::task::LocalSet`]; calling these methods outside one panics.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
    }

    fn set_interval(&self, period: Duration, mut callback: Box<dyn FnMut()>) {
        // tokio rejects a zero period
        let period = period.max(Duration::from_millis(1));
        tokio::task::spawn_local(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                callback();
            }
        });
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_runs_after_delay() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let fired = Rc::new(Cell::new(false));

                let flag = Rc::clone(&fired);
                scheduler.set_timeout(Duration::from_millis(3000), Box::new(move || flag.set(true)));

                tokio::time::sleep(Duration::from_millis(2999)).await;
                assert!(!fired.get());
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert!(fired.get());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_skips_immediate_tick() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let scheduler = TokioScheduler::new();
                let ticks = Rc::new(Cell::new(0));

                let counter = Rc::clone(&ticks);
                scheduler.set_interval(
                    Duration::from_secs(1),
                    Box::new(move || counter.set(counter.get() + 1)),
                );

                tokio::task::yield_now().await;
                assert_eq!(ticks.get(), 0);
                tokio::time::sleep(Duration::from_millis(3500)).await;
                assert_eq!(ticks.get(), 3);
            })
            .await;
    }
}
