//! habit-core — shared library for the habit tracker.
//!
//! Provides:
//! - `view` — markup tree, HTML renderer and the landing view
//!
//! With `query` feature (default):
//! - `query` — accessible role/text queries over rendered HTML
//!
//! With `api` feature (default):
//! - `api` — JSON-serializable API types (health check)

pub mod view;

#[cfg(feature = "query")]
pub mod query;

#[cfg(feature = "api")]
pub mod api;

/// Crate version, reported by the health check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git revision the binary was built from.
pub const GIT_REVISION: &str = env!("HABIT_GIT_REVISION");

/// Version string for `--version` output, e.g. "0.1.0 (abc1234)".
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HABIT_GIT_REVISION"),
    ")"
);
