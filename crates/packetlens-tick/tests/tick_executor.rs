//! Integration tests for the tick scheduler and the single-writer executor.
//!
//! Timing tests use `start_paused = true` so the clock only moves when
//! every task is idle, which makes tick boundaries deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use packetlens_tick::{MainContext, TickConfig, TickExecutor, TickScheduler};
use tokio::sync::oneshot;

// =========================================================================
// Helpers
// =========================================================================

fn config_20hz() -> TickConfig {
    TickConfig {
        initial_jitter_us: 0,
        ..TickConfig::with_rate(20)
    }
}

fn counter_task(counter: &Arc<AtomicUsize>) -> Box<dyn FnOnce() + Send> {
    let counter = Arc::clone(counter);
    Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_is_event_driven() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.tick_rate_hz, 0);
    assert_eq!(cfg.max_tasks_per_tick, 0);
    assert_eq!(cfg.period(), None);
}

#[test]
fn test_config_fields_default_when_omitted() {
    let cfg: TickConfig = serde_json::from_str(r#"{"tick_rate_hz": 50}"#).unwrap();
    assert_eq!(cfg.tick_rate_hz, 50);
    assert_eq!(cfg.budget_warn_threshold, 0.80);
    assert_eq!(cfg.initial_jitter_us, 2_000);
}

#[test]
fn test_with_rate_sets_duration() {
    let cfg = TickConfig::with_rate(20);
    assert_eq!(cfg.period(), Some(Duration::from_millis(50)));
}

#[test]
fn test_validated_clamps_out_of_range_values() {
    let cfg = TickConfig {
        tick_rate_hz: 10_000,
        budget_warn_threshold: 3.0,
        ..TickConfig::default()
    }
    .validated();
    assert_eq!(cfg.tick_rate_hz, TickConfig::MAX_TICK_RATE_HZ);
    assert_eq!(cfg.budget_warn_threshold, 1.0);
}

// =========================================================================
// Scheduler
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_ticks_increment_monotonically() {
    let mut s = TickScheduler::new(&config_20hz());
    for expected in 1..=5 {
        let tick = s.next_tick().await;
        assert_eq!(tick.number, expected);
        assert_eq!(tick.skipped, 0);
    }
    assert_eq!(s.ticks(), 5);
}

#[test]
fn test_slow_drain_follows_threshold() {
    let s = TickScheduler::new(&TickConfig {
        budget_warn_threshold: 0.5,
        ..config_20hz()
    });
    assert_eq!(s.period(), Some(Duration::from_millis(50)));
    assert_eq!(s.slow_drain(), Some(Duration::from_millis(25)));

    let event_driven = TickScheduler::new(&TickConfig::default());
    assert_eq!(event_driven.slow_drain(), None);
}

#[tokio::test(start_paused = true)]
async fn test_event_driven_scheduler_never_fires() {
    let mut s = TickScheduler::new(&TickConfig::default());
    assert!(s.is_event_driven());
    let result = tokio::time::timeout(Duration::from_secs(5), s.next_tick()).await;
    assert!(result.is_err(), "event-driven scheduler should pend forever");
}

#[tokio::test(start_paused = true)]
async fn test_late_tick_skips_ahead() {
    let mut s = TickScheduler::new(&config_20hz());
    s.next_tick().await;

    // A drain that blew through three whole ticks.
    tokio::time::advance(Duration::from_millis(175)).await;
    let tick = s.next_tick().await;
    assert_eq!(tick.number, 2);
    assert_eq!(tick.skipped, 2);
    assert_eq!(tick.late_by, Duration::from_millis(125));

    // The grid holds: the next slot is 250ms after start, not 275ms.
    tokio::time::advance(Duration::from_millis(25)).await;
    let tick = s.next_tick().await;
    assert_eq!(tick.skipped, 0);
    assert_eq!(tick.late_by, Duration::ZERO);
}

// =========================================================================
// Executor: event-driven
// =========================================================================

#[tokio::test]
async fn test_event_driven_runs_task_promptly() {
    let (handle, join) = TickExecutor::spawn(TickConfig::default());
    let (tx, rx) = oneshot::channel();

    handle
        .submit(Box::new(move || {
            let _ = tx.send(42);
        }))
        .ok();
    assert_eq!(rx.await.ok(), Some(42));

    handle.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn test_tasks_run_in_submission_order() {
    let (handle, join) = TickExecutor::spawn(TickConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    for i in 0..10 {
        let seen = Arc::clone(&seen);
        assert!(handle.submit(Box::new(move || seen.lock().unwrap().push(i))).is_ok());
    }
    handle.shutdown();
    join.await.unwrap();

    assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
    assert_eq!(handle.stats().completed, 10);
}

#[tokio::test]
async fn test_is_main_only_inside_tasks() {
    let (handle, join) = TickExecutor::spawn(TickConfig::default());
    assert!(!handle.is_main());

    let inner = handle.clone();
    let (tx, rx) = oneshot::channel();
    handle
        .submit(Box::new(move || {
            let _ = tx.send(inner.is_main());
        }))
        .ok();
    assert_eq!(rx.await.ok(), Some(true));
    assert!(!handle.is_main());

    handle.shutdown();
    join.await.unwrap();
}

// =========================================================================
// Executor: ticked
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_ticked_executor_waits_for_tick() {
    let (handle, join) = TickExecutor::spawn(config_20hz());
    let (tx, mut rx) = oneshot::channel();
    handle
        .submit(Box::new(move || {
            let _ = tx.send(());
        }))
        .ok();

    let early = tokio::time::timeout(Duration::from_millis(10), &mut rx).await;
    assert!(early.is_err(), "task must not run before the first tick");

    assert!(rx.await.is_ok());
    handle.shutdown();
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_task_limit_spreads_work_across_ticks() {
    let config = TickConfig {
        max_tasks_per_tick: 2,
        ..config_20hz()
    };
    let (handle, join) = TickExecutor::spawn(config);
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        assert!(handle.submit(counter_task(&counter)).is_ok());
    }

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 4);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 5);

    handle.shutdown();
    join.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stats_count_ticks() {
    let (handle, join) = TickExecutor::spawn(config_20hz());
    let counter = Arc::new(AtomicUsize::new(0));
    assert!(handle.submit(counter_task(&counter)).is_ok());

    tokio::time::sleep(Duration::from_millis(120)).await;
    let stats = handle.stats();
    assert_eq!(stats.ticks, 2);
    assert_eq!(stats.skipped_ticks, 0);
    assert_eq!(stats.completed, 1);

    handle.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn test_event_driven_stats_have_no_ticks() {
    let (handle, join) = TickExecutor::spawn(TickConfig::default());
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        assert!(handle.submit(counter_task(&counter)).is_ok());
    }
    handle.shutdown();
    join.await.unwrap();

    let stats = handle.stats();
    assert_eq!(stats.ticks, 0);
    assert_eq!(stats.completed, 3);
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_shutdown_runs_queued_tasks_then_rejects() {
    let (handle, join) = TickExecutor::spawn(config_20hz());
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        assert!(handle.submit(counter_task(&counter)).is_ok());
    }
    assert!(handle.shutdown());
    join.await.unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert!(handle.is_closed());
    assert!(handle.submit(counter_task(&counter)).is_err());
    assert!(!handle.shutdown());
}

#[tokio::test]
async fn test_dropping_every_handle_stops_executor() {
    let (handle, join) = TickExecutor::spawn(TickConfig::default());
    drop(handle);
    tokio::time::timeout(Duration::from_secs(1), join)
        .await
        .expect("executor should stop")
        .unwrap();
}
