//! Shared foundation for the Mind Color Map services.
//!
//! Provides the unified error type, configuration loading, and logging
//! setup used by every other crate in the workspace.

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result, ResultExt};
