//! # Transition Records
//!
//! The engine stores nothing. Callers that keep an audit trail ask
//! [`Lifecycle::apply`](crate::Lifecycle::apply) for a [`TransitionRecord`]
//! and persist it next to the new status.

use serde::{Deserialize, Serialize};

use hostreg_core::Timestamp;

/// Record of one applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord<I, S, T> {
    /// The entity that moved (invoice id, domain id).
    pub subject: I,
    /// State before the transition.
    pub from: S,
    /// Transition that was applied.
    pub transition: T,
    /// State after the transition.
    pub to: S,
    /// When the engine approved the transition.
    pub at: Timestamp,
}

impl<I, S, T> std::fmt::Display for TransitionRecord<I, S, T>
where
    I: std::fmt::Display,
    S: std::fmt::Display,
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} --{}--> {} at {}",
            self.subject, self.from, self.transition, self.to, self.at
        )
    }
}
