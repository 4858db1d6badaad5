//! # Mapping Errors
//!
//! Errors raised while converting vocabulary elements to and from JSON-LD.
//! Every variant is deterministic: retrying the same call yields the same
//! error, so nothing in this crate retries.

use thiserror::Error;

/// Error from JSON-LD mapping or vocabulary dispatch.
#[derive(Error, Debug)]
pub enum MappingError {
    /// A document that must carry an `@context` does not.
    #[error("@context is missing on the JSON-LD document: {0}")]
    MissingContext(String),

    /// The structural mapping produced or received something unusable
    /// (a non-object document, or a tree that does not fit the target type).
    #[error("JSON-LD mapping failed: {0}")]
    MappingFailure(String),

    /// Dispatch to a vocabulary name that is not registered.
    #[error("unknown vocabulary {0:?}")]
    UnknownVocabulary(String),

    /// JSON text could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MappingError {
    /// Log this error once at the point of failure and hand it back for
    /// propagation.
    pub(crate) fn logged(self) -> Self {
        match &self {
            Self::UnknownVocabulary(_) => tracing::error!(error = %self, "vocabulary dispatch failed"),
            _ => tracing::warn!(error = %self, "JSON-LD mapping failed"),
        }
        self
    }
}
