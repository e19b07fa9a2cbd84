//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use zoomspy_core::config;
//!
//! let cfg = config::load_config(None);
//! let settings = cfg.settings().expect("incomplete configuration");
//! println!("Base URL: {}", settings.base_url);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config};
pub use schema::{Config, Settings};
