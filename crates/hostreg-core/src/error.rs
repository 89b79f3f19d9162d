//! # Error Types
//!
//! Top-level error for hostreg services. Library crates define their own
//! `thiserror` enums and convert into [`HostregError`] at the service
//! boundary.

use thiserror::Error;

/// Top-level error type for hostreg.
#[derive(Error, Debug)]
pub enum HostregError {
    /// A lifecycle transition was rejected by its transition table.
    #[error("{0}")]
    InvalidTransition(String),

    /// A lifecycle table could not be built or loaded.
    #[error("lifecycle table error: {0}")]
    Table(String),

    /// Input failed validation (malformed identifier, timestamp, name).
    #[error("validation error: {0}")]
    Validation(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
