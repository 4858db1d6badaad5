//! # tracevocab-cli: Command-Line Tool
//!
//! Provides the `tracevocab` binary.
//!
//! ## Subcommands
//!
//! - `tracevocab pgln`: Identifier checks and Digital Link projection.
//! - `tracevocab vocab`: JSON-LD compaction and expansion through the
//!   vocabulary registry.
//! - `tracevocab schema`: Schema profile listing and document checks.
//!
//! ```bash
//! tracevocab pgln check 0614141000012 urn:epc:id:sgln:0614141.00002.0
//! tracevocab vocab compact --kind location farm.json
//! tracevocab schema check --schemas schemas --profile gs1-location farm.jsonld
//! ```
//!
//! Every handler returns the process exit code: `0` on success, `1` when
//! the input was checked and found invalid. Errors propagate as
//! [`anyhow::Error`] and are reported by `main`.

pub mod pgln;
pub mod schema;
pub mod vocab;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a whole input file as UTF-8 text.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
