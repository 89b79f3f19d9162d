//! # hostreg-core - Foundational Types
//!
//! Leaf crate of the hostreg workspace. Defines the primitives shared by the
//! lifecycle engine and its callers (billing jobs, order processing,
//! registrar synchronization).
//!
//! ## Contents
//!
//! - [`Timestamp`]: UTC-only, seconds precision.
//! - [`InvoiceId`], [`DomainId`]: newtype identifiers, so an invoice id can
//!   never be passed where a domain id is expected.
//! - [`HostregError`]: top-level error that services bubble up.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hostreg-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::HostregError;
pub use identity::{DomainId, InvoiceId};
pub use temporal::Timestamp;
