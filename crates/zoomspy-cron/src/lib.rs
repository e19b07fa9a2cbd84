//! zoomspy cron — run the pipeline on a timer.
//!
//! - [`trigger::Trigger`] — fixed interval or cron expression
//! - [`service::Scheduler`] — sleep until the next fire time, run, repeat
//!
//! A tick is awaited before the next fire time is computed, so two runs
//! never overlap; fire times that pass during a long run are skipped.

pub mod service;
pub mod trigger;

pub use service::{on_tick, OnTickFn, Scheduler, TickFuture};
pub use trigger::Trigger;
