//! `zoomspy run` and `zoomspy watch`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use zoomspy_core::config::{load_config, Settings};
use zoomspy_cron::{on_tick, Scheduler, Trigger};
use zoomspy_mattermost::{ClientConfig, MattermostClient};
use zoomspy_pipeline::ZoomSpy;

use crate::helpers;

/// Load config and validate it into `Settings`.
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let config = load_config(config_path);
    config.settings().context("configuration is incomplete")
}

fn build_spy(settings: &Settings) -> Result<ZoomSpy<MattermostClient>> {
    let client = MattermostClient::new(ClientConfig::from_settings(settings))
        .context("failed to build HTTP client")?;
    Ok(ZoomSpy::new(client, settings))
}

/// One pass. With `dry_run`, only reads.
pub async fn run(config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let settings = load_settings(config_path)?;
    let spy = build_spy(&settings)?;

    if dry_run {
        let preview = spy.preview().await.context("failed to read unread posts")?;
        helpers::print_preview(&preview);
        return Ok(());
    }

    let report = spy.run_once().await.context("run failed")?;
    helpers::print_report(&report);
    Ok(())
}

/// Pick the trigger: `--every`, then `--cron`, then the configured schedule,
/// then the default interval.
fn choose_trigger(every: Option<u64>, cron: Option<&str>, schedule: Option<&str>) -> Result<Trigger> {
    let trigger = match (every, cron, schedule) {
        (Some(secs), _, _) => Trigger::every(Duration::from_secs(secs))?,
        (None, Some(expr), _) => Trigger::cron(expr)?,
        (None, None, Some(expr)) => Trigger::cron(expr)?,
        (None, None, None) => Trigger::default(),
    };
    Ok(trigger)
}

/// Run on a timer until Ctrl+C.
pub async fn watch(config_path: Option<&Path>, every: Option<u64>, cron: Option<String>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let trigger = choose_trigger(every, cron.as_deref(), settings.schedule.as_deref())?;
    let spy = Arc::new(build_spy(&settings)?);

    println!(
        "{} Watching for Zoom links ({}). Press Ctrl+C to stop.",
        "●".green(),
        trigger.describe()
    );

    let callback = on_tick(move || {
        let spy = spy.clone();
        async move {
            spy.run_once().await?;
            Ok::<(), anyhow::Error>(())
        }
    });

    let scheduler = Scheduler::new(trigger, callback);

    tokio::select! {
        result = scheduler.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
            scheduler.stop();
        }
    }

    Ok(())
}
