//! # hostreg-cli - Lifecycle Command-Line Interface
//!
//! Lets operators and integrators ask the lifecycle engine the same
//! questions the billing and registrar jobs ask it.
//!
//! ## Subcommands
//!
//! - `hostreg invoice check|apply|transitions|table` - built-in invoice lifecycle.
//! - `hostreg domain check|apply|transitions|table --table <file>` - an
//!   integrator-supplied domain lifecycle.
//!
//! ## Exit Codes
//!
//! - `0` - success; the transition is allowed.
//! - `1` - usage, configuration, or table error.
//! - `2` - the transition was rejected by the table.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs` and the `*Args` types.
//! - Lifecycle decisions are delegated to `hostreg-lifecycle`.

pub mod config;
pub mod domain;
pub mod invoice;
pub mod output;

/// Exit code for a transition the table rejects.
pub const EXIT_REJECTED: u8 = 2;
