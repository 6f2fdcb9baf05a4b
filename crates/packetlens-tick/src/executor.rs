//! Single-writer executor.
//!
//! A [`TickExecutor`] owns a task queue and runs it on one tokio task.
//! Everything submitted through an [`ExecutorHandle`] therefore runs
//! sequentially, never concurrently with another submitted task. The
//! registry uses this to serialize structural mutations.
//!
//! ```text
//!   any thread ── submit(task) ──► [ mpsc queue ] ──► executor task
//!                                                    (drains per tick)
//! ```

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::SendError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::scheduler::{Tick, TickConfig, TickScheduler};

/// A unit of work for the main context.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

thread_local! {
    /// Set while a task submitted to an executor is running on this thread.
    static ON_EXECUTOR: Cell<bool> = const { Cell::new(false) };
}

// ---------------------------------------------------------------------------
// MainContext
// ---------------------------------------------------------------------------

/// A designated execution context that serializes work.
///
/// Implementations must run accepted tasks one at a time, in submission
/// order.
pub trait MainContext: Send + Sync {
    /// `true` when the caller is already running on this context.
    fn is_main(&self) -> bool;

    /// Hands `task` to the context.
    ///
    /// On failure (the context is shutting down or gone) the task is
    /// returned so the caller can decide what to do with it.
    fn submit(&self, task: Task) -> Result<(), Task>;
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

enum Command {
    Run(Task),
    Shutdown,
}

#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    completed: AtomicU64,
    panicked: AtomicU64,
    ticks: AtomicU64,
    skipped_ticks: AtomicU64,
    max_drain_us: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> ExecutorStats {
        ExecutorStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
            ticks: self.ticks.load(Ordering::Relaxed),
            skipped_ticks: self.skipped_ticks.load(Ordering::Relaxed),
            max_drain: Duration::from_micros(self.max_drain_us.load(Ordering::Relaxed)),
        }
    }
}

/// Point-in-time executor counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    /// Tasks accepted by [`MainContext::submit`].
    pub submitted: u64,
    /// Tasks that ran to completion.
    pub completed: u64,
    /// Tasks that panicked. The executor keeps going.
    pub panicked: u64,
    /// Ticks fired. Always 0 in event-driven mode.
    pub ticks: u64,
    /// Tick slots dropped because a batch ran late.
    pub skipped_ticks: u64,
    /// Longest time a single batch took to run.
    pub max_drain: Duration,
}

/// Cloneable handle to a running [`TickExecutor`].
#[derive(Clone)]
pub struct ExecutorHandle {
    tx: mpsc::UnboundedSender<Command>,
    counters: Arc<Counters>,
}

impl ExecutorHandle {
    /// Asks the executor to stop after running what is already queued.
    ///
    /// Returns `false` if the executor had already stopped.
    pub fn shutdown(&self) -> bool {
        self.tx.send(Command::Shutdown).is_ok()
    }

    /// `true` once the executor no longer accepts tasks.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn stats(&self) -> ExecutorStats {
        self.counters.snapshot()
    }
}

impl MainContext for ExecutorHandle {
    fn is_main(&self) -> bool {
        ON_EXECUTOR.with(Cell::get)
    }

    fn submit(&self, task: Task) -> Result<(), Task> {
        match self.tx.send(Command::Run(task)) {
            Ok(()) => {
                self.counters.submitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(SendError(Command::Run(task))) => Err(task),
            Err(SendError(Command::Shutdown)) => Ok(()),
        }
    }
}

impl std::fmt::Debug for ExecutorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorHandle")
            .field("closed", &self.is_closed())
            .field("stats", &self.stats())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Outcome of one drain pass.
struct Drain {
    ran: usize,
    open: bool,
}

/// Runs submitted tasks one at a time, once per tick.
///
/// In event-driven mode (`tick_rate_hz == 0`) tasks run as soon as they
/// are received.
pub struct TickExecutor {
    scheduler: TickScheduler,
    rx: mpsc::UnboundedReceiver<Command>,
    counters: Arc<Counters>,
    max_tasks_per_tick: usize,
}

impl TickExecutor {
    /// Creates an executor and the handle used to feed it.
    ///
    /// Nothing runs until [`TickExecutor::run`] is polled.
    pub fn new(config: TickConfig) -> (Self, ExecutorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let executor = Self {
            scheduler: TickScheduler::new(&config),
            rx,
            counters: Arc::clone(&counters),
            max_tasks_per_tick: config.max_tasks_per_tick,
        };
        (executor, ExecutorHandle { tx, counters })
    }

    /// Creates an executor and spawns it on the current tokio runtime.
    pub fn spawn(config: TickConfig) -> (ExecutorHandle, JoinHandle<()>) {
        let (executor, handle) = Self::new(config);
        let join = tokio::spawn(executor.run());
        (handle, join)
    }

    /// Runs until [`ExecutorHandle::shutdown`] is called or every handle
    /// is dropped. Tasks still queued at that point are run before
    /// returning.
    pub async fn run(mut self) {
        info!(
            period = ?self.scheduler.period(),
            event_driven = self.scheduler.is_event_driven(),
            "executor started"
        );

        loop {
            let open = if self.scheduler.is_event_driven() {
                match self.rx.recv().await {
                    Some(Command::Run(task)) => {
                        let started = Instant::now();
                        self.run_task(task);
                        let drain = self.drain(1);
                        self.record_batch(None, drain.ran, started.elapsed());
                        drain.open
                    }
                    Some(Command::Shutdown) | None => false,
                }
            } else {
                let tick = self.scheduler.next_tick().await;
                self.record_tick(&tick);
                let started = Instant::now();
                let drain = self.drain(0);
                self.record_batch(Some(tick.number), drain.ran, started.elapsed());
                drain.open
            };

            if !open {
                break;
            }
        }

        self.finish();
        info!(stats = ?self.counters.snapshot(), "executor stopped");
    }

    /// Runs queued tasks without blocking, honouring `max_tasks_per_tick`.
    ///
    /// `already_ran` counts tasks this tick has run before the call.
    fn drain(&mut self, already_ran: usize) -> Drain {
        let mut ran = already_ran;
        loop {
            if self.max_tasks_per_tick > 0 && ran >= self.max_tasks_per_tick {
                return Drain { ran, open: true };
            }
            match self.rx.try_recv() {
                Ok(Command::Run(task)) => {
                    self.run_task(task);
                    ran += 1;
                }
                Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => {
                    return Drain { ran, open: false };
                }
                Err(TryRecvError::Empty) => return Drain { ran, open: true },
            }
        }
    }

    /// Stops accepting work and runs whatever is left, ignoring the
    /// per-tick limit.
    fn finish(&mut self) {
        self.rx.close();
        let mut leftover = 0usize;
        while let Ok(command) = self.rx.try_recv() {
            if let Command::Run(task) = command {
                self.run_task(task);
                leftover += 1;
            }
        }
        if leftover > 0 {
            debug!(leftover, "ran queued tasks during shutdown");
        }
    }

    fn record_tick(&self, tick: &Tick) {
        self.counters.ticks.fetch_add(1, Ordering::Relaxed);
        self.counters
            .skipped_ticks
            .fetch_add(tick.skipped, Ordering::Relaxed);
    }

    /// Tracks the slowest batch and reports any that overran the budget.
    fn record_batch(&self, tick: Option<u64>, ran: usize, elapsed: Duration) {
        if ran == 0 {
            return;
        }
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.counters.max_drain_us.fetch_max(micros, Ordering::Relaxed);

        match self.scheduler.slow_drain() {
            Some(budget) if elapsed > budget => warn!(
                ?tick,
                ran,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = budget.as_secs_f64() * 1000.0,
                "batch overran its tick budget"
            ),
            _ => debug!(?tick, ran, "batch done"),
        }
    }

    fn run_task(&self, task: Task) {
        ON_EXECUTOR.with(|flag| flag.set(true));
        let result = panic::catch_unwind(AssertUnwindSafe(task));
        ON_EXECUTOR.with(|flag| flag.set(false));

        match result {
            Ok(()) => {
                self.counters.completed.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.counters.panicked.fetch_add(1, Ordering::Relaxed);
                warn!("main context task panicked");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_main_outside_executor() {
        let (_executor, handle) = TickExecutor::new(TickConfig::default());
        assert!(!handle.is_main());
    }

    #[test]
    fn test_submit_after_receiver_dropped_returns_task() {
        let (executor, handle) = TickExecutor::new(TickConfig::default());
        drop(executor);
        assert!(handle.is_closed());

        let returned = handle.submit(Box::new(|| {}));
        assert!(returned.is_err());
        assert_eq!(handle.stats().submitted, 0);
    }

    #[test]
    fn test_drain_honours_task_limit() {
        let config = TickConfig {
            max_tasks_per_tick: 2,
            ..TickConfig::with_rate(20)
        };
        let (mut executor, handle) = TickExecutor::new(config);
        for _ in 0..5 {
            assert!(handle.submit(Box::new(|| {})).is_ok());
        }

        let first = executor.drain(0);
        assert_eq!(first.ran, 2);
        assert!(first.open);
        assert_eq!(handle.stats().completed, 2);

        executor.finish();
        assert_eq!(handle.stats().completed, 5);
    }

    #[test]
    fn test_record_batch_keeps_longest_drain() {
        let (executor, handle) = TickExecutor::new(TickConfig::with_rate(20));
        executor.record_batch(Some(1), 3, Duration::from_millis(4));
        executor.record_batch(Some(2), 1, Duration::from_millis(2));
        // Budget at 20Hz is 40ms; this one is logged as slow.
        executor.record_batch(Some(3), 1, Duration::from_millis(45));
        // Empty batches are not timed.
        executor.record_batch(Some(4), 0, Duration::from_millis(90));

        assert_eq!(handle.stats().max_drain, Duration::from_millis(45));
    }

    #[test]
    fn test_record_tick_accumulates_skips() {
        let (executor, handle) = TickExecutor::new(TickConfig::with_rate(20));
        executor.record_tick(&Tick {
            number: 1,
            late_by: Duration::ZERO,
            skipped: 0,
        });
        executor.record_tick(&Tick {
            number: 2,
            late_by: Duration::from_millis(120),
            skipped: 2,
        });

        let stats = handle.stats();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.skipped_ticks, 2);
    }

    #[test]
    fn test_panicking_task_is_contained() {
        let (mut executor, handle) = TickExecutor::new(TickConfig::default());
        assert!(handle.submit(Box::new(|| panic!("boom"))).is_ok());
        assert!(handle.submit(Box::new(|| {})).is_ok());

        let drain = executor.drain(0);
        assert_eq!(drain.ran, 2);
        let stats = handle.stats();
        assert_eq!(stats.panicked, 1);
        assert_eq!(stats.completed, 1);
    }
}
