//! zoomspy pipeline — one stateless pass over the chat service.
//!
//! - [`unread::UnreadPipeline`] — team scope → channels → unread posts →
//!   posts with joinable meeting links
//! - [`repost::RepostJob`] — permalinks into the spy channel, then mark-read
//! - [`runner::ZoomSpy`] — `run_once()` gluing both, one run at a time

pub mod repost;
pub mod runner;
pub mod unread;

#[cfg(test)]
pub(crate) mod testing;

pub use repost::{PlannedRepost, RepostJob, RepostSummary};
pub use runner::{Preview, RunReport, ZoomSpy};
pub use unread::{TeamScope, UnreadPipeline, UnreadSnapshot};
