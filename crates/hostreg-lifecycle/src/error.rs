//! # Lifecycle Errors
//!
//! [`InvalidTransition`] is the only error the engine itself produces. It is
//! a contract violation (the caller asked for a move the table does not
//! allow, or acted on a stale status) and is never retryable.
//!
//! [`TableError`] covers building tables from rule lists and loading
//! integrator-supplied table files.

use std::path::PathBuf;

use hostreg_core::HostregError;
use thiserror::Error;

/// A `(state, transition)` pair with no entry in the transition table.
///
/// Carries the typed state and verb so callers can match on them instead
/// of parsing the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {entity} transition: {transition} is not allowed from {from}")]
pub struct InvalidTransition<S, T> {
    /// Entity kind whose table rejected the pair (`"invoice"`, `"domain"`).
    pub entity: &'static str,
    /// State the caller claimed the entity is in.
    pub from: S,
    /// Transition that was attempted.
    pub transition: T,
}

/// Errors raised while building or loading a transition table.
#[derive(Error, Debug)]
pub enum TableError {
    /// Two rules share the same `(from, transition)` key.
    #[error("{entity} table rule #{index}: duplicate rule for {transition} from {from}")]
    DuplicateRule {
        /// Entity kind of the table.
        entity: &'static str,
        /// Zero-based position of the offending rule.
        index: usize,
        /// Source state of the duplicated key.
        from: String,
        /// Transition of the duplicated key.
        transition: String,
    },

    /// A rule in a table file names something outside the vocabulary.
    #[error("table rule #{index}: {source}")]
    UnknownName {
        /// Zero-based position of the offending rule.
        index: usize,
        /// The unrecognized name.
        #[source]
        source: UnknownName,
    },

    /// A rule in a table file has a blank state name.
    #[error("table rule #{index}: state name must not be empty")]
    EmptyState {
        /// Zero-based position of the offending rule.
        index: usize,
    },

    /// The table file is not valid YAML/JSON or has the wrong shape.
    #[error("table file parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The table file could not be read.
    #[error("failed to read table file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A name that does not belong to a closed state or transition set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {name:?}")]
pub struct UnknownName {
    /// Which vocabulary was consulted (e.g. `"invoice state"`).
    pub kind: &'static str,
    /// The name as given.
    pub name: String,
}

impl<S, T> From<InvalidTransition<S, T>> for HostregError
where
    S: std::fmt::Display,
    T: std::fmt::Display,
{
    fn from(err: InvalidTransition<S, T>) -> Self {
        HostregError::InvalidTransition(err.to_string())
    }
}

impl From<TableError> for HostregError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Read { source, .. } => HostregError::Io(source),
            other => HostregError::Table(other.to_string()),
        }
    }
}
