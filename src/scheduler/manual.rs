//! Deterministic scheduler with host-controlled time.

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::Scheduler;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        callback: Box<dyn FnMut()>,
    },
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    task: TimerTask,
}

/// Scheduler whose clock only moves when [`ManualScheduler::advance`] is called.
///
/// Timers fire in due-time order, ties broken by registration order. Spawned
/// futures are polled on a local pool after every fired callback, so a task
/// whose I/O resolves immediately completes within the same `advance`.
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Create a scheduler starting at `0`
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            now: Cell::new(Duration::ZERO),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Elapsed virtual time
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers waiting to fire (intervals count once)
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Poll spawned tasks until none can make progress
    pub fn run_until_idle(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Move virtual time forward by `dt`, firing everything that falls due
    pub fn advance(&self, dt: Duration) {
        let target = self.now.get().saturating_add(dt);
        self.run_until_idle();

        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due);
            match timer.task {
                TimerTask::Once(callback) => callback(),
                TimerTask::Repeat {
                    period,
                    mut callback,
                } => {
                    callback();
                    self.push(timer.due + period, TimerTask::Repeat { period, callback });
                }
            }
            self.run_until_idle();
        }

        self.now.set(target);
    }

    fn push(&self, due: Duration, task: TimerTask) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers
            .borrow_mut()
            .push(PendingTimer { due, seq, task });
    }

    fn pop_due(&self, target: Duration) -> Option<PendingTimer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(timers.swap_remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.push(self.now.get() + delay, TimerTask::Once(callback));
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) {
        let period = period.max(MIN_INTERVAL);
        self.push(self.now.get() + period, TimerTask::Repeat { period, callback });
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(task) {
            tracing::error!("Failed to spawn task: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_timeouts_fire_in_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let log = Rc::clone(&log);
            scheduler.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        scheduler.advance(Duration::from_millis(150));
        assert_eq!(*log.borrow(), vec!["a", "a2"]);

        scheduler.advance(Duration::from_millis(150));
        assert_eq!(*log.borrow(), vec!["a", "a2", "b", "c"]);
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(300));
    }

    #[test]
    fn test_nested_timeout_fires_within_same_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let fired = Rc::new(Cell::new(false));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_fired = Rc::clone(&fired);
        scheduler.set_timeout(
            Duration::from_millis(3000),
            Box::new(move || {
                inner_scheduler.set_timeout(
                    Duration::from_millis(300),
                    Box::new(move || inner_fired.set(true)),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(3299));
        assert!(!fired.get());
        scheduler.advance(Duration::from_millis(1));
        assert!(fired.get());
    }

    #[test]
    fn test_interval_repeats() {
        let scheduler = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));

        let counter = Rc::clone(&ticks);
        scheduler.set_interval(
            Duration::from_secs(1),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        scheduler.advance(Duration::from_millis(999));
        assert_eq!(ticks.get(), 0);
        scheduler.advance(Duration::from_millis(4001));
        assert_eq!(ticks.get(), 5);
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn test_spawned_tasks_run_when_idle() {
        let scheduler = ManualScheduler::new();
        let done = Rc::new(Cell::new(false));

        let flag = Rc::clone(&done);
        scheduler.spawn(Box::pin(async move {
            flag.set(true);
        }));

        assert!(!done.get());
        scheduler.run_until_idle();
        assert!(done.get());
    }
}
