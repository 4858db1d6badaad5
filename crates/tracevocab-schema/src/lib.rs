//! # tracevocab-schema: Schema Profile Checking
//!
//! Checks JSON and JSON-LD documents against JSON Schema profiles. The
//! [`validate`] module loads profiles from a directory of `*.schema.json`
//! files (the repository ships GS1 master-data profiles under `schemas/`),
//! resolves cross-schema `$ref`s locally, and reports violations as
//! `"<instance path> :: <message>"` lines.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tracevocab-*` crates outside tests.
//! - No network access during `$ref` resolution.
//! - An invalid document is a normal [`SchemaReport`], not an error.

pub mod validate;

pub use validate::{SchemaChecker, SchemaError, SchemaReport};
