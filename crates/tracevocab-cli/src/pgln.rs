//! # PGLN CLI: Check identifiers and project them to Digital Link paths.
//!
//! ```bash
//! tracevocab pgln check 0614141000012 urn:gdst:example.org:party:acme.1
//! tracevocab pgln digital-link urn:epc:id:sgln:0123456.00001.0
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use tracevocab_core::Pgln;

/// PGLN subcommand arguments.
#[derive(Args, Debug)]
pub struct PglnArgs {
    #[command(subcommand)]
    pub command: PglnCommand,
}

/// Available PGLN subcommands.
#[derive(Subcommand, Debug)]
pub enum PglnCommand {
    /// Check one or more identifiers. Exits 1 if any is invalid.
    Check {
        /// Identifiers to check.
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Print the GS1 Digital Link path (`417/<GLN>`) of an identifier.
    DigitalLink {
        /// Identifier to project.
        value: String,
    },
}

/// Execute the pgln subcommand.
pub fn run_pgln(args: &PglnArgs) -> Result<u8> {
    match &args.command {
        PglnCommand::Check { values } => {
            let mut code = 0;
            for value in values {
                let (ok, line) = check_line(value);
                println!("{line}");
                if !ok {
                    code = 1;
                }
            }
            Ok(code)
        }
        PglnCommand::DigitalLink { value } => {
            let pgln = Pgln::new(value.as_str())?;
            println!("{}", pgln.to_digital_link_url());
            Ok(0)
        }
    }
}

/// One report line for `value`, and whether it was valid.
fn check_line(value: &str) -> (bool, String) {
    match Pgln::detect_issue(value) {
        None => (true, format!("ok {value}")),
        Some(issue) => (false, format!("invalid {value}: {issue}")),
    }
}
