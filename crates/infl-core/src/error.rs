//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `InflError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `infl-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum InflError {
    #[error("invalid grid {cols}x{rows}: both dimensions must be in 1..={max}")]
    InvalidGrid { rows: u32, cols: u32, max: u32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `infl-*` crates.
pub type InflResult<T> = Result<T, InflError>;
