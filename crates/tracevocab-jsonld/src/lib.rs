//! # tracevocab-jsonld: JSON-LD Vocabulary Mapping
//!
//! Maps typed master-data objects to compacted JSON-LD documents and back.
//!
//! ## Architecture
//!
//! - [`namespace`] scrapes prefix → namespace declarations out of an
//!   `@context` and compacts or expands predicate IRIs with them.
//! - [`binding`] holds the static field → predicate metadata every mappable
//!   type declares through [`VocabularyElement`].
//! - [`mapper`] drives the conversion in both directions.
//! - [`gs1`] defines the GS1 Web Vocabulary types and default context.
//! - [`diagnostics`] checks master-data resolver responses against what
//!   was queried.
//! - [`registry`] names the supported vocabularies and dispatches to their
//!   mappers.
//!
//! ## Crate Policy
//!
//! - Depends only on `tracevocab-core` within the workspace.
//! - Mapping never mutates the caller's element; see
//!   [`JsonLdMapper::apply_default_context`] for the explicit opt-in.
//! - Failures are logged with `tracing` where they occur and then returned.

pub mod binding;
pub mod diagnostics;
pub mod error;
pub mod gs1;
pub mod mapper;
pub mod namespace;
pub mod registry;

pub use binding::{ClassBinding, TermBinding, VocabularyElement};
pub use diagnostics::{
    check_master_data_json, check_master_data_response, Diagnostic, DiagnosticKind,
    DiagnosticLevel, MasterDataItem, MasterDataQuery,
};
pub use error::MappingError;
pub use gs1::{GeoCoordinates, Location, PostalAddress, TradeItem, TradingParty};
pub use mapper::JsonLdMapper;
pub use namespace::NamespaceMap;
pub use registry::{map_from_json_ld, map_to_json_ld, Vocabulary};
