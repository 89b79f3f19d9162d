//! # Invoice Subcommand
//!
//! Queries against the built-in invoice lifecycle.
//!
//! ```bash
//! hostreg invoice check ISSUED PAY
//! hostreg invoice apply overdue void --invoice 6f1c...
//! hostreg invoice transitions ISSUED
//! hostreg --format json invoice table
//! ```

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use hostreg_core::InvoiceId;
use hostreg_lifecycle::{invoice_lifecycle, InvoiceState, InvoiceTransition};

use crate::config::Settings;
use crate::output;

/// Arguments for the invoice subcommand.
#[derive(Args, Debug)]
pub struct InvoiceArgs {
    #[command(subcommand)]
    pub command: InvoiceCommand,
}

/// Invoice lifecycle queries.
#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// Report whether a transition is allowed (exit 0) or rejected (exit 2).
    Check {
        /// Current invoice status.
        from: InvoiceState,
        /// Requested transition.
        transition: InvoiceTransition,
    },

    /// Apply a transition and print the resulting status.
    Apply {
        /// Current invoice status.
        from: InvoiceState,
        /// Requested transition.
        transition: InvoiceTransition,
        /// Invoice id; when given, prints a transition record instead.
        #[arg(long)]
        invoice: Option<InvoiceId>,
    },

    /// List the transitions allowed from a status.
    Transitions {
        /// Current invoice status.
        from: InvoiceState,
    },

    /// Print the whole invoice transition table.
    Table,
}

/// Execute the invoice subcommand.
pub fn run_invoice(args: &InvoiceArgs, settings: &Settings, out: &mut dyn Write) -> Result<u8> {
    let lifecycle = invoice_lifecycle();
    let format = settings.format;
    match &args.command {
        InvoiceCommand::Check { from, transition } => {
            output::check(lifecycle, from, *transition, format, out)
        }
        InvoiceCommand::Apply {
            from,
            transition,
            invoice,
        } => output::apply(lifecycle, invoice.as_ref(), from, *transition, format, out),
        InvoiceCommand::Transitions { from } => output::transitions(lifecycle, from, format, out),
        InvoiceCommand::Table => output::table(lifecycle, format, out),
    }
}
