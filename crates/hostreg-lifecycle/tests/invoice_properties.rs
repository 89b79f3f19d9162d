//! # Invoice Lifecycle Properties
//!
//! Checks the invoice engine against its reference table over every
//! `(state, transition)` pair, plus idempotence and concurrent use.

use std::collections::{HashMap, HashSet};

use hostreg_lifecycle::invoice::{can_transition, transition, valid_transitions, INVOICE_RULES};
use hostreg_lifecycle::{invoice_lifecycle, InvoiceState, InvoiceTransition};
use proptest::prelude::*;

fn reference() -> HashMap<(InvoiceState, InvoiceTransition), InvoiceState> {
    use InvoiceState::*;
    use InvoiceTransition::*;
    HashMap::from([
        ((Draft, Send), Issued),
        ((Draft, Void), Cancelled),
        ((Issued, Pay), Paid),
        ((Issued, MarkOverdue), Overdue),
        ((Issued, Void), Cancelled),
        ((Overdue, Pay), Paid),
        ((Overdue, Void), Cancelled),
        ((Paid, Refund), Credited),
    ])
}

fn all_pairs() -> impl Iterator<Item = (InvoiceState, InvoiceTransition)> {
    InvoiceState::ALL.iter().flat_map(|&state| {
        InvoiceTransition::ALL
            .iter()
            .map(move |&verb| (state, verb))
    })
}

#[test]
fn built_in_rules_match_reference() {
    let built: HashMap<_, _> = INVOICE_RULES
        .iter()
        .map(|&(from, verb, to)| ((from, verb), to))
        .collect();
    assert_eq!(built, reference());
}

#[test]
fn tabled_pairs_are_legal_and_map_exactly() {
    for ((state, verb), expected) in reference() {
        assert!(can_transition(state, verb), "{state} {verb}");
        assert_eq!(transition(state, verb).unwrap(), expected, "{state} {verb}");
    }
}

#[test]
fn untabled_pairs_are_rejected() {
    let table = reference();
    let mut rejected = 0;
    for (state, verb) in all_pairs().filter(|pair| !table.contains_key(pair)) {
        assert!(!can_transition(state, verb), "{state} {verb}");
        let err = transition(state, verb).unwrap_err();
        assert_eq!((err.from, err.transition), (state, verb));
        rejected += 1;
    }
    assert_eq!(
        rejected,
        InvoiceState::ALL.len() * InvoiceTransition::ALL.len() - table.len()
    );
}

#[test]
fn valid_transitions_equal_legal_set_without_duplicates() {
    for &state in InvoiceState::ALL {
        let listed = valid_transitions(state);
        let unique: HashSet<_> = listed.iter().copied().collect();
        assert_eq!(unique.len(), listed.len(), "duplicates for {state}");

        let legal: HashSet<_> = InvoiceTransition::ALL
            .iter()
            .copied()
            .filter(|&verb| can_transition(state, verb))
            .collect();
        assert_eq!(unique, legal, "{state}");
    }
}

#[test]
fn scenario_draft_send() {
    assert!(can_transition(InvoiceState::Draft, InvoiceTransition::Send));
    assert_eq!(
        transition(InvoiceState::Draft, InvoiceTransition::Send).unwrap(),
        InvoiceState::Issued
    );
}

#[test]
fn scenario_draft_pay_rejected_with_diagnostics() {
    assert!(!can_transition(InvoiceState::Draft, InvoiceTransition::Pay));
    let message = transition(InvoiceState::Draft, InvoiceTransition::Pay)
        .unwrap_err()
        .to_string();
    assert!(message.contains("DRAFT") && message.contains("PAY"), "{message}");
}

#[test]
fn scenario_issued_valid_transitions() {
    let listed: HashSet<_> = valid_transitions(InvoiceState::Issued).into_iter().collect();
    let expected = HashSet::from([
        InvoiceTransition::Pay,
        InvoiceTransition::MarkOverdue,
        InvoiceTransition::Void,
    ]);
    assert_eq!(listed, expected);
}

#[test]
fn concurrent_readers_agree() {
    let expected: Vec<_> = all_pairs()
        .map(|(state, verb)| invoice_lifecycle().transition(&state, verb).ok())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    all_pairs()
                        .map(|(state, verb)| invoice_lifecycle().transition(&state, verb).ok())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

fn any_state() -> impl Strategy<Value = InvoiceState> {
    proptest::sample::select(InvoiceState::ALL)
}

fn any_transition() -> impl Strategy<Value = InvoiceTransition> {
    proptest::sample::select(InvoiceTransition::ALL)
}

proptest! {
    /// Repeated queries give identical answers.
    #[test]
    fn queries_are_idempotent(state in any_state(), verb in any_transition()) {
        let first = (can_transition(state, verb), valid_transitions(state));
        for _ in 0..3 {
            prop_assert_eq!(&(can_transition(state, verb), valid_transitions(state)), &first);
        }
    }

    /// `transition` succeeds exactly when `can_transition` says so.
    #[test]
    fn transition_agrees_with_can_transition(state in any_state(), verb in any_transition()) {
        prop_assert_eq!(transition(state, verb).is_ok(), can_transition(state, verb));
    }

    /// A verb is listed for a state exactly when it is legal there.
    #[test]
    fn listed_iff_legal(state in any_state(), verb in any_transition()) {
        prop_assert_eq!(valid_transitions(state).contains(&verb), can_transition(state, verb));
    }

    /// Random walks only ever pass through tabled moves.
    #[test]
    fn random_walk_follows_table(verbs in prop::collection::vec(any_transition(), 0..32)) {
        let table = reference();
        let mut state = InvoiceState::Draft;
        for verb in verbs {
            match transition(state, verb) {
                Ok(next) => {
                    prop_assert_eq!(table.get(&(state, verb)), Some(&next));
                    state = next;
                }
                Err(err) => {
                    prop_assert!(!table.contains_key(&(state, verb)));
                    prop_assert_eq!(err.from, state);
                }
            }
        }
    }
}
