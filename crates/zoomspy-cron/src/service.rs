//! Scheduler — periodic wake-up that runs one zoomspy pass per tick.
//!
//! Fully custom async timer on `tokio::time::sleep`; the tick callback is
//! awaited inline, which is what keeps runs from overlapping. A failed run
//! is logged and the next tick fires as usual, except for a configuration
//! error, which stops the loop and is returned from `start()`.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use tracing::{debug, error, info};

use zoomspy_core::Error;

use crate::trigger::Trigger;

// ─────────────────────────────────────────────
// Callback type
// ─────────────────────────────────────────────

/// Future returned by a tick callback.
pub type TickFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Callback invoked on each tick (typically `ZoomSpy::run_once`).
pub type OnTickFn = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Wrap an async closure as an `OnTickFn`.
pub fn on_tick<F, Fut>(f: F) -> OnTickFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move || -> TickFuture { Box::pin(f()) })
}

// ─────────────────────────────────────────────
// Scheduler
// ─────────────────────────────────────────────

pub struct Scheduler {
    trigger: Trigger,
    on_tick: OnTickFn,
    /// Run once at start instead of waiting for the first fire time.
    run_immediately: bool,
    shutdown: Arc<Notify>,
    ticks: AtomicU64,
}

impl Scheduler {
    pub fn new(trigger: Trigger, on_tick: OnTickFn) -> Self {
        Self {
            trigger,
            on_tick,
            run_immediately: true,
            shutdown: Arc::new(Notify::new()),
            ticks: AtomicU64::new(0),
        }
    }

    pub fn run_immediately(mut self, yes: bool) -> Self {
        self.run_immediately = yes;
        self
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Start the scheduler loop. Returns `Ok` when `stop()` is called or
    /// the trigger has no further fire time, and the error when a run fails
    /// with a configuration error.
    pub async fn start(&self) -> anyhow::Result<()> {
        info!(trigger = %self.trigger.describe(), "scheduler started");

        if self.run_immediately {
            self.tick().await?;
        }

        loop {
            let now = Utc::now();
            let Some(next) = self.trigger.next_after(now) else {
                info!("no further fire time, scheduler exiting");
                return Ok(());
            };
            let sleep_duration = (next - now).to_std().unwrap_or(Duration::ZERO);
            debug!(next = %next, "next run scheduled");

            tokio::select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    self.tick().await?;
                }
                _ = self.shutdown.notified() => {
                    info!("scheduler shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Stop the scheduler after the current tick.
    ///
    /// Safe to call before `start()` is awaited: the stop is remembered.
    pub fn stop(&self) {
        info!("stopping scheduler");
        self.shutdown.notify_one();
    }

    async fn tick(&self) -> anyhow::Result<()> {
        let started = std::time::Instant::now();
        let result = (self.on_tick)().await;
        self.ticks.fetch_add(1, Ordering::SeqCst);

        match result {
            Ok(()) => debug!(elapsed_ms = started.elapsed().as_millis() as u64, "tick finished"),
            Err(e) if is_fatal(&e) => {
                error!(error = %e, "scheduled run failed, stopping scheduler");
                return Err(e);
            }
            Err(e) => error!(error = %e, "scheduled run failed"),
        }
        Ok(())
    }
}

fn is_fatal(e: &anyhow::Error) -> bool {
    e.downcast_ref::<Error>().is_some_and(Error::is_fatal)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
