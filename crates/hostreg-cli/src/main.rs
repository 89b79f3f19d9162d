//! # hostreg CLI entry point
//!
//! Parses command-line arguments, sets up logging, and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hostreg_cli::config::Settings;
use hostreg_cli::domain::{run_domain, DomainArgs};
use hostreg_cli::invoice::{run_invoice, InvoiceArgs};
use hostreg_cli::output::OutputFormat;

/// hostreg - invoice and domain lifecycle toolkit.
///
/// Checks, applies, and lists lifecycle transitions using the same engine
/// the billing and registrar jobs use.
#[derive(Parser, Debug)]
#[command(name = "hostreg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format. Overrides `format` in the config file.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Invoice lifecycle (built-in table).
    Invoice(InvoiceArgs),

    /// Domain lifecycle (integrator-supplied table).
    Domain(DomainArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "hostreg CLI starting");

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let settings = Settings::resolve(cli.config.as_deref(), cli.format)?;
    tracing::debug!(?settings, "resolved settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Invoice(args) => run_invoice(args, &settings, &mut out),
        Commands::Domain(args) => run_domain(args, &settings, &mut out),
    }
}
