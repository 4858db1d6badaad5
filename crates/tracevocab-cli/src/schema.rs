//! # Schema CLI: Check documents against schema profiles.
//!
//! ```bash
//! tracevocab schema list --schemas schemas
//! tracevocab schema check --schemas schemas --profile gs1-location farm.jsonld
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tracevocab_schema::{SchemaChecker, SchemaReport};

use crate::read_input;

/// Schema subcommand arguments.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

/// Available schema subcommands.
#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// List the profiles found in a schema directory.
    List {
        /// Directory of `*.schema.json` files.
        #[arg(long, default_value = "schemas")]
        schemas: PathBuf,
    },

    /// Check a JSON document against a profile. Exits 1 if it is invalid.
    Check {
        /// Directory of `*.schema.json` files.
        #[arg(long, default_value = "schemas")]
        schemas: PathBuf,

        /// Profile name (schema file name without `.schema.json`).
        #[arg(long)]
        profile: String,

        /// Document to check.
        file: PathBuf,
    },
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    match &args.command {
        SchemaCommand::List { schemas } => {
            let checker = load(schemas)?;
            for profile in checker.profiles() {
                println!("{profile}");
            }
            Ok(0)
        }
        SchemaCommand::Check {
            schemas,
            profile,
            file,
        } => {
            let report = check(&load(schemas)?, profile, file)?;
            println!("{}: {report}", file.display());
            Ok(if report.valid { 0 } else { 1 })
        }
    }
}

fn load(dir: &Path) -> Result<SchemaChecker> {
    SchemaChecker::new(dir).with_context(|| format!("failed to load schemas from {}", dir.display()))
}

fn check(checker: &SchemaChecker, profile: &str, file: &Path) -> Result<SchemaReport> {
    let text = read_input(file)?;
    checker
        .is_valid(&text, profile)
        .with_context(|| format!("failed to check {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let schemas = dir.path().join("schemas");
        std::fs::create_dir(&schemas).unwrap();
        std::fs::write(
            schemas.join("named.schema.json"),
            r#"{"type": "object", "required": ["name"]}"#,
        )
        .unwrap();
        (dir, schemas)
    }

    #[test]
    fn check_exit_codes() {
        let (dir, schemas) = fixture();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"name": "x"}"#).unwrap();
        std::fs::write(&bad, "{}").unwrap();

        let run = |file: PathBuf| {
            run_schema(&SchemaArgs {
                command: SchemaCommand::Check {
                    schemas: schemas.clone(),
                    profile: "named".to_string(),
                    file,
                },
            })
        };
        assert_eq!(run(good).unwrap(), 0);
        assert_eq!(run(bad).unwrap(), 1);
    }

    #[test]
    fn check_reports_unknown_profile() {
        let (dir, schemas) = fixture();
        let file = dir.path().join("doc.json");
        std::fs::write(&file, "{}").unwrap();
        let checker = load(&schemas).unwrap();
        let err = check(&checker, "other", &file).unwrap_err();
        assert!(format!("{err:#}").contains("unknown schema profile 'other'"), "{err:#}");
    }

    #[test]
    fn list_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let args = SchemaArgs {
            command: SchemaCommand::List {
                schemas: dir.path().join("absent"),
            },
        };
        let err = run_schema(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schemas"), "{err:#}");
    }
}
