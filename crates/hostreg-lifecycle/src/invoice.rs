//! # Invoice Lifecycle
//!
//! The built-in lifecycle for invoices.
//!
//! | From     | Transition    | To        |
//! |----------|---------------|-----------|
//! | Draft    | Send          | Issued    |
//! | Draft    | Void          | Cancelled |
//! | Issued   | Pay           | Paid      |
//! | Issued   | MarkOverdue   | Overdue   |
//! | Issued   | Void          | Cancelled |
//! | Overdue  | Pay           | Paid      |
//! | Overdue  | Void          | Cancelled |
//! | Paid     | Refund        | Credited  |
//!
//! `PartialPay` has no rule. What a partial payment should do to an
//! invoice's status is undecided, so it is rejected from every state until
//! the billing side defines it.
//!
//! `Cancelled` and `Credited` have no outgoing rules and are therefore
//! terminal.
//!
//! The table is built once per process on first use and shared read-only.

use std::sync::OnceLock;

use hostreg_core::InvoiceId;

use crate::engine::Lifecycle;
use crate::error::InvalidTransition;
use crate::names::lifecycle_vocabulary;
use crate::record::TransitionRecord;
use crate::table::{TransitionRule, TransitionTable};

lifecycle_vocabulary! {
    /// Status of an invoice.
    pub enum InvoiceState ("invoice state") {
        /// Being prepared; not yet visible to the customer.
        Draft => "DRAFT",
        /// Sent to the customer and awaiting payment.
        Issued => "ISSUED",
        /// Past its due date without payment.
        Overdue => "OVERDUE",
        /// Settled in full.
        Paid => "PAID",
        /// Voided before payment.
        Cancelled => "CANCELLED",
        /// Refunded after payment.
        Credited => "CREDITED",
    }
}

lifecycle_vocabulary! {
    /// Lifecycle events that can be requested for an invoice.
    pub enum InvoiceTransition ("invoice transition") {
        /// Issue the invoice to the customer.
        Send => "SEND",
        /// Record full payment.
        Pay => "PAY",
        /// Record partial payment. No rule uses it.
        PartialPay => "PARTIAL_PAY",
        /// Cancel an unpaid invoice.
        Void => "VOID",
        /// Flag an issued invoice as past due.
        MarkOverdue => "MARK_OVERDUE",
        /// Refund a paid invoice.
        Refund => "REFUND",
    }
}

/// Engine type for invoices.
pub type InvoiceLifecycle = Lifecycle<InvoiceState, InvoiceTransition>;

/// Record type produced by [`InvoiceLifecycle::apply`].
pub type InvoiceTransitionRecord = TransitionRecord<InvoiceId, InvoiceState, InvoiceTransition>;

/// Entity label used in errors and logs.
pub const INVOICE_ENTITY: &str = "invoice";

/// The invoice rules, in declaration order.
pub const INVOICE_RULES: [(InvoiceState, InvoiceTransition, InvoiceState); 8] = {
    use InvoiceState::*;
    use InvoiceTransition::*;
    [
        (Draft, Send, Issued),
        (Draft, Void, Cancelled),
        (Issued, Pay, Paid),
        (Issued, MarkOverdue, Overdue),
        (Issued, Void, Cancelled),
        (Overdue, Pay, Paid),
        (Overdue, Void, Cancelled),
        (Paid, Refund, Credited),
    ]
};

fn invoice_rules() -> impl Iterator<Item = TransitionRule<InvoiceState, InvoiceTransition>> {
    INVOICE_RULES
        .into_iter()
        .map(|(from, transition, to)| TransitionRule::new(from, transition, to))
}

/// The process-wide invoice engine.
pub fn invoice_lifecycle() -> &'static InvoiceLifecycle {
    static LIFECYCLE: OnceLock<InvoiceLifecycle> = OnceLock::new();
    LIFECYCLE.get_or_init(|| {
        Lifecycle::new(TransitionTable::from_trusted_rules(
            INVOICE_ENTITY,
            invoice_rules(),
        ))
    })
}

/// Whether `transition` is legal for an invoice in `state`.
pub fn can_transition(state: InvoiceState, transition: InvoiceTransition) -> bool {
    invoice_lifecycle().can_transition(&state, transition)
}

/// Apply `transition` to an invoice in `state`.
pub fn transition(
    state: InvoiceState,
    transition: InvoiceTransition,
) -> Result<InvoiceState, InvalidTransition<InvoiceState, InvoiceTransition>> {
    invoice_lifecycle().transition(&state, transition)
}

/// Transitions legal for an invoice in `state`.
pub fn valid_transitions(state: InvoiceState) -> Vec<InvoiceTransition> {
    invoice_lifecycle().valid_transitions(&state)
}
