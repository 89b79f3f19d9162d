//! # hostreg-lifecycle - Lifecycle Transition Engine
//!
//! Decides how invoices and domain registrations move between statuses.
//! Every engine is a pure function over `(current state, transition)`
//! backed by an immutable [`TransitionTable`]: a legal pair yields the new
//! state, an illegal pair yields [`InvalidTransition`]. Engines hold no
//! per-entity state; callers load the persisted status, ask the engine, and
//! write the result back under their own concurrency control.
//!
//! ## Lifecycles
//!
//! - **Invoice** (`invoice.rs`): built-in table, process-wide instance.
//!
//!   ```text
//!   Draft ──Send──▶ Issued ──Pay──▶ Paid ──Refund──▶ Credited
//!                     │               ▲
//!                MarkOverdue         Pay
//!                     ▼               │
//!                  Overdue ───────────┘
//!
//!   Draft | Issued | Overdue ──Void──▶ Cancelled
//!   ```
//!
//!   `PartialPay` is part of the vocabulary but has no rule, so it is
//!   rejected from every state.
//!
//! - **Domain** (`domain.rs`): transition vocabulary only. The status set
//!   and rules belong to the integrating application and are supplied in
//!   code or through a table file (`table_file.rs`).
//!
//! ## Concurrency
//!
//! Tables are never mutated after construction, so an engine can be shared
//! by reference across any number of threads without locking.

pub mod domain;
pub mod engine;
pub mod error;
pub mod invoice;
pub mod names;
pub mod record;
pub mod table;
pub mod table_file;

// ─── Engine re-exports ──────────────────────────────────────────────

pub use engine::Lifecycle;
pub use error::{InvalidTransition, TableError, UnknownName};
pub use names::{LifecycleState, LifecycleTransition};
pub use record::TransitionRecord;
pub use table::{TransitionRule, TransitionTable, TransitionTableBuilder};

// ─── Invoice re-exports ─────────────────────────────────────────────

pub use invoice::{
    invoice_lifecycle, InvoiceLifecycle, InvoiceState, InvoiceTransition,
    InvoiceTransitionRecord,
};

// ─── Domain re-exports ──────────────────────────────────────────────

pub use domain::{DomainLifecycle, DomainStatus, DomainTransition, DomainTransitionRecord};
pub use table_file::{load_domain_lifecycle, parse_domain_lifecycle, DomainTableFile};
