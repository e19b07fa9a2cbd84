//! When the next run fires.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};

use zoomspy_core::{Error, Result};

/// Default interval when neither `--every` nor a schedule is configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub enum Trigger {
    /// Fire every fixed interval, measured from the end of the previous run.
    Every(Duration),
    /// Fire on a cron schedule (UTC).
    Cron(Box<cron::Schedule>),
}

impl Trigger {
    pub fn every(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::config("interval must be greater than zero"));
        }
        Ok(Trigger::Every(interval))
    }

    /// Parse a cron expression.
    ///
    /// Accepts the classic 5-field form (`"* * * * *"`, minute first) as
    /// well as the 6/7-field form with seconds that the `cron` crate uses.
    pub fn cron(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        let normalized = if expr.split_whitespace().count() == 5 {
            format!("0 {expr}")
        } else {
            expr.to_string()
        };

        let schedule = cron::Schedule::from_str(&normalized)
            .map_err(|e| Error::config(format!("invalid cron expression '{expr}': {e}")))?;
        Ok(Trigger::Cron(Box::new(schedule)))
    }

    /// Next fire time strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Trigger::Every(interval) => {
                let interval = chrono::Duration::from_std(*interval).ok()?;
                now.checked_add_signed(interval)
            }
            Trigger::Cron(schedule) => schedule.after(&now).next(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Trigger::Every(interval) => format!("every {}s", interval.as_secs_f64()),
            Trigger::Cron(schedule) => format!("cron '{}'", schedule),
        }
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Trigger::Every(Duration::from_secs(DEFAULT_INTERVAL_SECS))
    }
}
