//! `ZoomSpy` — one run = pipeline + repost job.
//!
//! Runs never overlap: a run holds `run_lock` for its whole duration and a
//! second caller gets `Error::RunInProgress` instead of waiting. Whoever
//! drives `run_once` on a timer still owns the timing.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use zoomspy_core::config::Settings;
use zoomspy_core::{Error, Result};
use zoomspy_mattermost::ChatApi;

use crate::repost::{PlannedRepost, RepostJob, RepostSummary};
use crate::unread::{UnreadPipeline, UnreadSnapshot};

/// Outcome of `run_once`.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub snapshot: UnreadSnapshot,
    pub summary: RepostSummary,
}

/// Outcome of `preview`: what a run would repost.
#[derive(Clone, Debug)]
pub struct Preview {
    pub snapshot: UnreadSnapshot,
    pub reposts: Vec<PlannedRepost>,
}

pub struct ZoomSpy<A: ChatApi> {
    api: A,
    base_url: String,
    target_channel_id: String,
    team_id: Option<String>,
    run_lock: Mutex<()>,
}

impl<A: ChatApi> ZoomSpy<A> {
    pub fn new(api: A, settings: &Settings) -> Self {
        Self {
            api,
            base_url: settings.base_url.clone(),
            target_channel_id: settings.channel_id.clone(),
            team_id: settings.team_id.clone(),
            run_lock: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// One full pass: find meeting links, repost them, mark channels read.
    ///
    /// Fetch errors abort before anything is reposted. Repost and
    /// mark-read errors are counted in the report's summary.
    pub async fn run_once(&self) -> Result<RunReport> {
        let _guard = self.run_lock.try_lock().map_err(|_| {
            warn!("previous run still in progress, skipping");
            Error::RunInProgress
        })?;

        debug!(team_id = ?self.team_id, "run started");
        let snapshot = UnreadPipeline::new(&self.api, self.team_id.clone())
            .run()
            .await?;

        let summary = self.job(&snapshot).execute(&snapshot.channels).await;

        info!(
            channels = snapshot.channels.len(),
            reposted = summary.reposted,
            repost_failures = summary.repost_failures,
            mark_failures = summary.mark_failures,
            "run finished"
        );
        Ok(RunReport { snapshot, summary })
    }

    /// Pipeline only: nothing is posted and no channel is marked read.
    pub async fn preview(&self) -> Result<Preview> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| Error::RunInProgress)?;

        let snapshot = UnreadPipeline::new(&self.api, self.team_id.clone())
            .run()
            .await?;
        let reposts = self.job(&snapshot).plan(&snapshot.channels);
        Ok(Preview { snapshot, reposts })
    }

    fn job(&self, snapshot: &UnreadSnapshot) -> RepostJob<'_, A> {
        RepostJob::new(&self.api, &self.base_url, &self.target_channel_id)
            .with_team_name(snapshot.scope.permalink_team())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
