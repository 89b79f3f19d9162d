//! # Lifecycle Engine
//!
//! [`Lifecycle`] is the query/apply layer over a [`TransitionTable`]. It is
//! a deterministic transition function with no entry or exit actions, no
//! timers, and no per-entity state. A state with no outgoing rules is
//! terminal only because the table says so; the engine has no separate
//! notion of terminal states.

use tracing::debug;

use crate::error::{InvalidTransition, TableError};
use crate::names::{LifecycleState, LifecycleTransition};
use crate::record::TransitionRecord;
use crate::table::{TransitionRule, TransitionTable};

use hostreg_core::Timestamp;

/// Stateless lifecycle engine over one entity kind's transition table.
#[derive(Debug, Clone)]
pub struct Lifecycle<S, T> {
    table: TransitionTable<S, T>,
}

impl<S: LifecycleState, T: LifecycleTransition> Lifecycle<S, T> {
    /// Wrap an already-built table.
    pub fn new(table: TransitionTable<S, T>) -> Self {
        Self { table }
    }

    /// Build an engine directly from rules.
    ///
    /// # Errors
    ///
    /// [`TableError::DuplicateRule`] if two rules share a key.
    pub fn from_rules<I>(entity: &'static str, rules: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = TransitionRule<S, T>>,
    {
        TransitionTable::from_rules(entity, rules).map(Self::new)
    }

    /// Whether `transition` is legal from `state`.
    pub fn can_transition(&self, state: &S, transition: T) -> bool {
        self.table.contains(state, transition)
    }

    /// Apply `transition` to `state` and return the resulting state.
    ///
    /// # Errors
    ///
    /// [`InvalidTransition`] when the pair is not in the table. Callers
    /// should check [`can_transition`](Self::can_transition) first or treat
    /// this as a stale-status bug.
    pub fn transition(&self, state: &S, transition: T) -> Result<S, InvalidTransition<S, T>> {
        match self.table.lookup(state, transition) {
            Some(next) => Ok(next.clone()),
            None => {
                debug!(
                    entity = self.table.entity(),
                    from = %state,
                    %transition,
                    "rejected lifecycle transition"
                );
                Err(InvalidTransition {
                    entity: self.table.entity(),
                    from: state.clone(),
                    transition,
                })
            }
        }
    }

    /// Every transition legal from `state`, without duplicates.
    ///
    /// Returned in table declaration order, though callers should not rely
    /// on any order. Empty for states with no outgoing rules, including
    /// states the table has never heard of.
    pub fn valid_transitions(&self, state: &S) -> Vec<T> {
        let mut verbs: Vec<T> = Vec::new();
        for rule in self.table.outgoing_rules(state) {
            if !verbs.contains(&rule.transition) {
                verbs.push(rule.transition);
            }
        }
        verbs
    }

    /// Whether `state` has no outgoing rules.
    pub fn is_terminal(&self, state: &S) -> bool {
        self.table.outgoing_rules(state).next().is_none()
    }

    /// Apply `transition` and describe the move as a [`TransitionRecord`]
    /// for the caller to persist.
    ///
    /// # Errors
    ///
    /// Same as [`transition`](Self::transition).
    pub fn apply<I: Clone>(
        &self,
        subject: &I,
        state: &S,
        transition: T,
    ) -> Result<TransitionRecord<I, S, T>, InvalidTransition<S, T>> {
        let to = self.transition(state, transition)?;
        Ok(TransitionRecord {
            subject: subject.clone(),
            from: state.clone(),
            transition,
            to,
            at: Timestamp::now(),
        })
    }

    /// Every rule of the underlying table, in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &TransitionRule<S, T>> {
        self.table.rules()
    }

    /// The underlying table.
    pub fn table(&self) -> &TransitionTable<S, T> {
        &self.table
    }

    /// Entity kind label.
    pub fn entity(&self) -> &'static str {
        self.table.entity()
    }
}
