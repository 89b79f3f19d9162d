//! # Domain Subcommand
//!
//! Queries against an integrator-supplied domain lifecycle. The table file
//! comes from `--table` or the `domain_table` config key.
//!
//! ```bash
//! hostreg domain --table domain.yaml check ACTIVE SUSPEND
//! hostreg domain transitions pending-transfer --table domain.yaml
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hostreg_core::DomainId;
use hostreg_lifecycle::{load_domain_lifecycle, DomainLifecycle, DomainStatus, DomainTransition};

use crate::config::Settings;
use crate::output;

/// Arguments for the domain subcommand.
#[derive(Args, Debug)]
pub struct DomainArgs {
    /// Domain table file (YAML or JSON). Overrides `domain_table` in the config.
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: DomainCommand,
}

/// Domain lifecycle queries.
#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// Report whether a transition is allowed (exit 0) or rejected (exit 2).
    Check {
        /// Current domain status.
        from: DomainStatus,
        /// Requested transition.
        transition: DomainTransition,
    },

    /// Apply a transition and print the resulting status.
    Apply {
        /// Current domain status.
        from: DomainStatus,
        /// Requested transition.
        transition: DomainTransition,
        /// Domain id; when given, prints a transition record instead.
        #[arg(long)]
        domain: Option<DomainId>,
    },

    /// List the transitions allowed from a status.
    Transitions {
        /// Current domain status.
        from: DomainStatus,
    },

    /// Print the whole domain transition table.
    Table,
}

/// Execute the domain subcommand.
pub fn run_domain(args: &DomainArgs, settings: &Settings, out: &mut dyn Write) -> Result<u8> {
    let table_path = args
        .table
        .as_deref()
        .or(settings.domain_table.as_deref())
        .context("no domain table: pass --table or set domain_table in the config file")?;
    let lifecycle = load_table(table_path)?;
    let format = settings.format;

    match &args.command {
        DomainCommand::Check { from, transition } => {
            output::check(&lifecycle, from, *transition, format, out)
        }
        DomainCommand::Apply {
            from,
            transition,
            domain,
        } => output::apply(&lifecycle, domain.as_ref(), from, *transition, format, out),
        DomainCommand::Transitions { from } => output::transitions(&lifecycle, from, format, out),
        DomainCommand::Table => output::table(&lifecycle, format, out),
    }
}

fn load_table(path: &Path) -> Result<DomainLifecycle> {
    load_domain_lifecycle(path)
        .with_context(|| format!("failed to load domain table: {}", path.display()))
}
