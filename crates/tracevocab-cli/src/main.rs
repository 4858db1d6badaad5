//! # tracevocab CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tracevocab_cli::pgln::{run_pgln, PglnArgs};
use tracevocab_cli::schema::{run_schema, SchemaArgs};
use tracevocab_cli::vocab::{run_vocab, VocabArgs};

/// GS1 traceability vocabulary toolkit.
///
/// Validates party and location identifiers, converts GS1 Web Vocabulary
/// master data to and from JSON-LD, and checks documents against JSON
/// Schema profiles.
#[derive(Parser, Debug)]
#[command(name = "tracevocab", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check PGLN/GLN/SGLN identifiers.
    Pgln(PglnArgs),

    /// Convert master data to and from JSON-LD.
    Vocab(VocabArgs),

    /// Check documents against JSON Schema profiles.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tracevocab starting");

    let result = match &cli.command {
        Commands::Pgln(args) => run_pgln(args),
        Commands::Vocab(args) => run_vocab(args),
        Commands::Schema(args) => run_schema(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
