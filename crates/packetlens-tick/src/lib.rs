//! Main-context executor for Packetlens.
//!
//! Structural registry mutations must never run concurrently with each
//! other. This crate provides the context they are funneled through:
//!
//! - [`TickScheduler`]: the drain clock. Ticks stay on a fixed grid and
//!   missed slots are dropped, not replayed.
//! - [`TickExecutor`]: one tokio task that drains a queue of [`Task`]s per
//!   tick, or immediately in event-driven mode.
//! - [`MainContext`]: the seam the registry depends on. [`ExecutorHandle`]
//!   implements it; tests can supply their own.
//!
//! [`ExecutorStats`] reports task outcomes alongside tick and drain timing.
//!
//! # Example
//!
//! ```no_run
//! use packetlens_tick::{MainContext, TickConfig, TickExecutor};
//!
//! # async fn demo() {
//! let (handle, join) = TickExecutor::spawn(TickConfig::with_rate(20));
//! handle.submit(Box::new(|| println!("runs on the main context"))).ok();
//! handle.shutdown();
//! join.await.ok();
//! # }
//! ```

mod executor;
mod scheduler;

pub use executor::{ExecutorHandle, ExecutorStats, MainContext, Task, TickExecutor};
pub use scheduler::{Tick, TickConfig, TickScheduler};
