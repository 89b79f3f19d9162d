//! # Transition Tables
//!
//! A [`TransitionTable`] is the fixed set of legal moves for one entity
//! kind: a partial function from `(from, transition)` to the resulting
//! state. Absence of a key is the rejection signal; there is no error state.
//!
//! Tables are validated when built. A second rule for a key that is already
//! present is rejected with [`TableError::DuplicateRule`], even if both
//! rules agree on the target, so the table can never be ambiguous.
//!
//! Lookups go through a per-state index of outgoing rules. The index is
//! keyed by state and holds at most one rule per transition verb, so a
//! lookup costs one hash plus a scan bounded by the vocabulary size, and no
//! key is cloned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::names::{LifecycleState, LifecycleTransition};

/// One legal move: `from --transition--> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRule<S, T> {
    /// State the rule applies to.
    pub from: S,
    /// Verb that triggers the move.
    pub transition: T,
    /// Resulting state.
    pub to: S,
}

impl<S, T> TransitionRule<S, T> {
    /// Create a rule.
    pub fn new(from: S, transition: T, to: S) -> Self {
        Self {
            from,
            transition,
            to,
        }
    }
}

impl<S: std::fmt::Display, T: std::fmt::Display> std::fmt::Display for TransitionRule<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.transition, self.to)
    }
}

/// Immutable transition table for one entity kind.
#[derive(Debug, Clone)]
pub struct TransitionTable<S, T> {
    entity: &'static str,
    /// Rules in declaration order.
    rules: Vec<TransitionRule<S, T>>,
    /// Indices into `rules`, grouped by `from` state, in declaration order.
    outgoing: HashMap<S, Vec<usize>>,
}

impl<S: LifecycleState, T: LifecycleTransition> TransitionTable<S, T> {
    /// Start building a table for the named entity kind.
    pub fn builder(entity: &'static str) -> TransitionTableBuilder<S, T> {
        TransitionTableBuilder {
            entity,
            rules: Vec::new(),
        }
    }

    /// Build a table from rules, rejecting duplicate keys.
    ///
    /// # Errors
    ///
    /// [`TableError::DuplicateRule`] naming the first rule whose
    /// `(from, transition)` key was already taken.
    pub fn from_rules<I>(entity: &'static str, rules: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = TransitionRule<S, T>>,
    {
        let mut table = Self {
            entity,
            rules: Vec::new(),
            outgoing: HashMap::new(),
        };
        for (index, rule) in rules.into_iter().enumerate() {
            if table.lookup(&rule.from, rule.transition).is_some() {
                return Err(TableError::DuplicateRule {
                    entity,
                    index,
                    from: rule.from.to_string(),
                    transition: rule.transition.to_string(),
                });
            }
            table.push(rule);
        }
        tracing::trace!(entity, rules = table.rules.len(), "built transition table");
        Ok(table)
    }

    /// Build a table from rules known to be free of duplicate keys.
    ///
    /// Used for the built-in tables, whose contents are checked by tests.
    /// If a key does repeat, the first rule wins.
    pub(crate) fn from_trusted_rules<I>(entity: &'static str, rules: I) -> Self
    where
        I: IntoIterator<Item = TransitionRule<S, T>>,
    {
        let mut table = Self {
            entity,
            rules: Vec::new(),
            outgoing: HashMap::new(),
        };
        for rule in rules {
            debug_assert!(
                table.lookup(&rule.from, rule.transition).is_none(),
                "duplicate built-in rule {rule}"
            );
            if table.lookup(&rule.from, rule.transition).is_none() {
                table.push(rule);
            }
        }
        table
    }

    fn push(&mut self, rule: TransitionRule<S, T>) {
        let index = self.rules.len();
        self.outgoing
            .entry(rule.from.clone())
            .or_default()
            .push(index);
        self.rules.push(rule);
    }

    /// Entity kind label (`"invoice"`, `"domain"`).
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// The resulting state for `(from, transition)`, if the move is legal.
    pub fn lookup(&self, from: &S, transition: T) -> Option<&S> {
        self.outgoing_rules(from)
            .find(|rule| rule.transition == transition)
            .map(|rule| &rule.to)
    }

    /// Whether `(from, transition)` is a key of the table.
    pub fn contains(&self, from: &S, transition: T) -> bool {
        self.lookup(from, transition).is_some()
    }

    /// Rules whose source state is `from`, in declaration order.
    pub fn outgoing_rules<'a>(
        &'a self,
        from: &S,
    ) -> impl Iterator<Item = &'a TransitionRule<S, T>> + 'a {
        self.outgoing
            .get(from)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.rules[i])
    }

    /// Every rule, in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &TransitionRule<S, T>> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Incremental construction of a [`TransitionTable`].
#[derive(Debug, Clone)]
pub struct TransitionTableBuilder<S, T> {
    entity: &'static str,
    rules: Vec<TransitionRule<S, T>>,
}

impl<S: LifecycleState, T: LifecycleTransition> TransitionTableBuilder<S, T> {
    /// Add a rule.
    pub fn rule(mut self, from: S, transition: T, to: S) -> Self {
        self.rules.push(TransitionRule::new(from, transition, to));
        self
    }

    /// Validate and build the table.
    ///
    /// # Errors
    ///
    /// See [`TransitionTable::from_rules`].
    pub fn build(self) -> Result<TransitionTable<S, T>, TableError> {
        TransitionTable::from_rules(self.entity, self.rules)
    }
}
