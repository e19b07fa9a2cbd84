//! zoomspy core — everything the other crates share.
//!
//! - **types**: Mattermost entities (`Team`, `Channel`, `Post`, ...) and
//!   the per-run `ChannelUnread` result
//! - **error**: the `Error` taxonomy used across the workspace
//! - **config**: JSON + env configuration and validated `Settings`
//! - **links**: Zoom meeting-link classification
//! - **utils**: base URL normalization and permalink building

pub mod config;
pub mod error;
pub mod links;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use types::{Channel, ChannelMembership, ChannelUnread, Post, Team};
