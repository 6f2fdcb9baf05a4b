//! Drain clock for the executor.
//!
//! A ticked executor applies queued mutations in batches. [`TickScheduler`]
//! says when the next batch is due and how long a batch may take before it
//! counts as slow. Ticks stay on the grid laid out at start: a batch that
//! runs late drops the slots it missed instead of replaying them.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// TickConfig
// ---------------------------------------------------------------------------

/// Cadence of a [`TickExecutor`](crate::TickExecutor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Batches per second. `0` runs each task as soon as it arrives.
    pub tick_rate_hz: u32,
    /// Most tasks a single batch runs; the rest wait for the next tick.
    /// `0` means no limit.
    pub max_tasks_per_tick: usize,
    /// Share of the period, from 0.0 to 1.0, a batch may use before the
    /// executor logs it as slow.
    pub budget_warn_threshold: f64,
    /// Upper bound in microseconds of the random delay before the first
    /// tick, so executors started together spread out.
    pub initial_jitter_us: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 0,
            max_tasks_per_tick: 0,
            budget_warn_threshold: 0.80,
            initial_jitter_us: 2_000,
        }
    }
}

impl TickConfig {
    pub const MAX_TICK_RATE_HZ: u32 = 128;

    /// A ticked config, every other field at its default.
    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Self::default()
        }
    }

    /// Brings every field into its usable range.
    pub fn validated(self) -> Self {
        let tick_rate_hz = self.tick_rate_hz.min(Self::MAX_TICK_RATE_HZ);
        if tick_rate_hz != self.tick_rate_hz {
            warn!(
                requested = self.tick_rate_hz,
                used = tick_rate_hz,
                "tick rate above the supported maximum"
            );
        }
        let budget_warn_threshold = if self.budget_warn_threshold.is_nan() {
            Self::default().budget_warn_threshold
        } else {
            self.budget_warn_threshold.clamp(0.0, 1.0)
        };
        Self {
            tick_rate_hz,
            budget_warn_threshold,
            ..self
        }
    }

    /// Time between ticks. `None` when event-driven.
    pub fn period(&self) -> Option<Duration> {
        (self.tick_rate_hz > 0).then(|| Duration::from_secs(1) / self.tick_rate_hz)
    }
}

// ---------------------------------------------------------------------------
// TickScheduler
// ---------------------------------------------------------------------------

/// One tick, as handed to the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Starts at 1.
    pub number: u64,
    /// How long after its slot the tick was observed.
    pub late_by: Duration,
    /// Whole slots that passed without a tick.
    pub skipped: u64,
}

#[derive(Debug)]
pub struct TickScheduler {
    period: Option<Duration>,
    due: Instant,
    ticks: u64,
    slow_drain: Option<Duration>,
}

impl TickScheduler {
    pub fn new(config: &TickConfig) -> Self {
        let config = config.clone().validated();
        let period = config.period();
        let jitter = match config.initial_jitter_us {
            0 => Duration::ZERO,
            max => Duration::from_micros(rand::rng().random_range(0..max)),
        };
        debug!(
            rate_hz = config.tick_rate_hz,
            ?period,
            ?jitter,
            "tick scheduler ready"
        );

        Self {
            period,
            due: Instant::now() + period.unwrap_or_default() + jitter,
            ticks: 0,
            slow_drain: period.map(|p| p.mul_f64(config.budget_warn_threshold)),
        }
    }

    /// Sleeps until the next slot. Never resolves when event-driven.
    pub async fn next_tick(&mut self) -> Tick {
        let Some(period) = self.period else {
            return std::future::pending().await;
        };

        time::sleep_until(self.due).await;
        let late_by = Instant::now().saturating_duration_since(self.due);
        let skipped = (late_by.as_nanos() / period.as_nanos()) as u64;
        self.due += period.saturating_mul(u32::try_from(skipped + 1).unwrap_or(u32::MAX));
        self.ticks += 1;

        if skipped > 0 {
            warn!(
                tick = self.ticks,
                skipped,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "executor fell behind, dropping missed ticks"
            );
        } else {
            trace!(tick = self.ticks, "tick");
        }

        Tick {
            number: self.ticks,
            late_by,
            skipped,
        }
    }

    pub fn is_event_driven(&self) -> bool {
        self.period.is_none()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drain time above which a batch is reported as slow.
    pub fn slow_drain(&self) -> Option<Duration> {
        self.slow_drain
    }
}
