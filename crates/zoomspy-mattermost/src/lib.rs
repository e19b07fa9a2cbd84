//! Mattermost REST client for zoomspy.
//!
//! # Architecture
//!
//! - [`api::ChatApi`] — the operations the pipeline needs, as a trait
//! - [`client::MattermostClient`] — the reqwest implementation
//! - [`client::ClientConfig`] — immutable connection settings
//! - [`wire`] — request/response shapes that only exist on the wire

pub mod api;
pub mod client;
pub mod wire;

pub use api::ChatApi;
pub use client::{ClientConfig, MattermostClient};
