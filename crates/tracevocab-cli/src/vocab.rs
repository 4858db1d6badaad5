//! # Vocabulary CLI: Convert master data to and from JSON-LD.
//!
//! `compact` reads a plain JSON object keyed by field name and prints its
//! JSON-LD document. `expand` reads a JSON-LD document and prints the typed
//! object as plain JSON.
//!
//! ```bash
//! tracevocab vocab list
//! tracevocab vocab compact --kind trading-party party.json
//! tracevocab vocab expand --vocab GS1WebVocab --kind location farm.jsonld
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use tracevocab_jsonld::{
    map_from_json_ld, map_to_json_ld, Location, TradeItem, TradingParty, Vocabulary,
    VocabularyElement,
};

use crate::read_input;

/// Vocabulary subcommand arguments.
#[derive(Args, Debug)]
pub struct VocabArgs {
    #[command(subcommand)]
    pub command: VocabCommand,
}

/// Available vocabulary subcommands.
#[derive(Subcommand, Debug)]
pub enum VocabCommand {
    /// List registered vocabularies.
    List,

    /// Map a plain JSON object to a JSON-LD document.
    Compact(ConvertArgs),

    /// Map a JSON-LD document to a plain JSON object.
    Expand(ConvertArgs),
}

/// Arguments shared by `compact` and `expand`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Registered vocabulary name.
    #[arg(long, default_value = "GS1WebVocab")]
    pub vocab: String,

    /// Kind of master data in the input.
    #[arg(long, value_enum)]
    pub kind: Kind,

    /// Input file.
    pub file: PathBuf,
}

/// Master-data kinds the CLI can convert.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    TradingParty,
    Location,
    TradeItem,
}

/// Execute the vocab subcommand.
pub fn run_vocab(args: &VocabArgs) -> Result<u8> {
    match &args.command {
        VocabCommand::List => {
            for v in Vocabulary::all() {
                println!("{v}");
            }
            Ok(0)
        }
        VocabCommand::Compact(convert) => {
            println!("{}", compact_file(convert)?);
            Ok(0)
        }
        VocabCommand::Expand(convert) => {
            println!("{}", expand_file(convert)?);
            Ok(0)
        }
    }
}

fn compact_file(args: &ConvertArgs) -> Result<String> {
    let text = read_input(&args.file)?;
    match args.kind {
        Kind::TradingParty => compact::<TradingParty>(&args.vocab, &text, &args.file),
        Kind::Location => compact::<Location>(&args.vocab, &text, &args.file),
        Kind::TradeItem => compact::<TradeItem>(&args.vocab, &text, &args.file),
    }
}

fn expand_file(args: &ConvertArgs) -> Result<String> {
    let text = read_input(&args.file)?;
    match args.kind {
        Kind::TradingParty => expand::<TradingParty>(&args.vocab, &text, &args.file),
        Kind::Location => expand::<Location>(&args.vocab, &text, &args.file),
        Kind::TradeItem => expand::<TradeItem>(&args.vocab, &text, &args.file),
    }
}

fn compact<T: VocabularyElement>(vocab: &str, text: &str, path: &Path) -> Result<String> {
    let element: T = serde_json::from_str(text)
        .with_context(|| format!("{} is not a valid {}", path.display(), std::any::type_name::<T>()))?;
    let document = map_to_json_ld(vocab, &element)?;
    let value: serde_json::Value = serde_json::from_str(&document)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn expand<T: VocabularyElement>(vocab: &str, text: &str, path: &Path) -> Result<String> {
    let element: T = map_from_json_ld(vocab, text)
        .with_context(|| format!("failed to read JSON-LD from {}", path.display()))?;
    Ok(serde_json::to_string_pretty(&element)?)
}
