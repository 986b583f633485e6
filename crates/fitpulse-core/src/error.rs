//! Configuration errors.
//!
//! The engine itself is total over its inputs; the only fallible surface
//! is caller-supplied tuning.

use thiserror::Error;

/// Errors reported by config validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("scoring weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("max_tasks must be at least 1")]
    ZeroMaxTasks,
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
