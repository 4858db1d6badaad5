//! # Error Types
//!
//! Validation errors for identifier primitives. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! [`PglnIssue`] is the reason a candidate string was rejected; its
//! `Display` output is the human-readable explanation surfaced to users.
//! [`ValidationError`] is what the strict constructors return and carries
//! both the offending value and the issue.

use thiserror::Error;

/// Why a string is not a valid PGLN.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PglnIssue {
    /// The input was empty.
    #[error("PGLN is NULL or EMPTY.")]
    Empty,

    /// The input contained a space character.
    #[error("PGLN cannot contain spaces.")]
    ContainsSpace,

    /// The input contained a character outside `[._\-:0-9A-Za-z]`.
    #[error("The PGLN contains non-compatiable characters for a URI.")]
    UriIncompatibleCharacters,

    /// A 13-digit GLN whose last digit is not the computed check digit.
    #[error(
        "The check sum did not calculate correctly. The expected check sum was {expected}. \
         Please make sure to validate that you typed the PGLN correctly. It's possible the \
         check sum was typed correctly but another number was entered wrong."
    )]
    ChecksumMismatch {
        /// The check digit computed over the first 12 digits.
        expected: char,
        /// The last digit actually present.
        found: char,
    },

    /// A GS1 PGLN/SGLN URN whose last segment lacks a `.`-separated
    /// company prefix and location reference.
    #[error(
        "This is supposed to contain the company prefix and the location code. \
         Did not find these two pieces."
    )]
    MissingUrnPieces,

    /// The company prefix or location reference of a GS1 URN contains
    /// something other than digits.
    #[error(
        "This is supposed to be a GS1 PGLN based on the System Prefix and Data Type Prefix. \
         That means the Company Prefix and Serial Numbers should only be digits. Found \
         non-digit characters in the Company Prefix or Serial Number."
    )]
    NonDigitUrnPieces,

    /// The company prefix and location reference of a GS1 URN do not
    /// add up to 12 digits.
    #[error(
        "This is supposed to be a GS1 PGLN based on the System Prefix and Data Type Prefix. \
         That means the Company Prefix and Serial Numbers should contain a maximum total of \
         12 digits between the two. The total number of digits when combined is {actual}."
    )]
    WrongUrnDigitCount {
        /// Number of digits found after concatenating the two pieces.
        actual: usize,
    },

    /// The input matches none of the accepted grammars.
    #[error("The PGLN is not in a valid EPCIS URI format or in GS1 (P)GLN-13 format. PGLN = {0}")]
    UnrecognizedFormat(String),
}

/// Error returned by validating constructors of identifier newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not a valid PGLN.
    #[error("The PGLN {value} is not valid. {issue}")]
    InvalidPgln {
        /// The rejected input, verbatim.
        value: String,
        /// The specific reason it was rejected.
        issue: PglnIssue,
    },
}

impl ValidationError {
    /// The underlying PGLN issue, when this error is about a PGLN.
    pub fn pgln_issue(&self) -> Option<&PglnIssue> {
        match self {
            Self::InvalidPgln { issue, .. } => Some(issue),
        }
    }
}
