//! # Party Global Location Number
//!
//! [`Pgln`] identifies a trading party or location in full-chain
//! traceability data. Three textual forms are accepted:
//!
//! | Form | Example | Rule |
//! |------|---------|------|
//! | GLN-13 | `4006381333931` | 13 digits, last = check digit of the first 12 |
//! | URN party | `urn:gdst:example.org:party:acme.1` | starts with `urn:`, contains `:party:` |
//! | GS1 URN | `urn:epc:id:sgln:0123456.00001.0` | starts with `urn:`, contains `:id:pgln:` or `:id:sgln:`, company prefix + location reference = 12 digits |
//!
//! ## Validation
//!
//! Every candidate is first screened for emptiness, spaces and characters
//! outside `[._\-:0-9A-Za-z]`, then matched against the forms above in
//! table order. The first failing rule determines the [`PglnIssue`].
//!
//! ## Identity
//!
//! The string is stored exactly as given. `Eq`, `Hash` and `Ord` operate on
//! its ASCII-lowercased projection, and `Display` prints that projection.
//! `Serialize` writes the stored string unchanged.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checksum::check_digit_str;
use crate::error::{PglnIssue, ValidationError};

const GS1_PGLN_MARKER: &str = ":id:pgln:";
const GS1_SGLN_MARKER: &str = ":id:sgln:";
const PARTY_MARKER: &str = ":party:";
const URN_SCHEME: &str = "urn:";

/// Application identifier prefix for a GLN in a GS1 Digital Link path.
const DIGITAL_LINK_AI: &str = "417";

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's silent `try_parse()` so that invalid values are
/// rejected at deserialization time without a duplicate log line.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::try_parse(&raw).map_err(|issue| {
                    serde::de::Error::custom(ValidationError::InvalidPgln { value: raw, issue })
                })
            }
        }
    };
}

/// A validated Party Global Location Number.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Pgln(String);

impl_validating_deserialize!(Pgln);

impl Pgln {
    /// Create a PGLN from a string, validating its format.
    ///
    /// Failures are logged once at `warn` level before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPgln`] naming the first rule the
    /// input violates.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        match Self::detect_issue(&value) {
            None => Ok(Self(value)),
            Some(issue) => {
                let err = ValidationError::InvalidPgln { value, issue };
                tracing::warn!(error = %err, "rejected PGLN");
                Err(err)
            }
        }
    }

    /// Validate without logging, returning either the identifier or the
    /// reason it was rejected.
    pub fn try_parse(value: &str) -> Result<Self, PglnIssue> {
        match Self::detect_issue(value) {
            None => Ok(Self(value.to_string())),
            Some(issue) => Err(issue),
        }
    }

    /// Returns `true` if `value` is a valid PGLN in any accepted form.
    pub fn is_pgln(value: &str) -> bool {
        Self::detect_issue(value).is_none()
    }

    /// Return the first validation rule `value` violates, or `None` if it
    /// is a valid PGLN.
    pub fn detect_issue(value: &str) -> Option<PglnIssue> {
        if value.is_empty() {
            return Some(PglnIssue::Empty);
        }
        if value.contains(' ') {
            return Some(PglnIssue::ContainsSpace);
        }
        if !value.chars().all(is_uri_safe) {
            return Some(PglnIssue::UriIncompatibleCharacters);
        }

        if value.len() == 13 && is_only_digits(value) {
            let (payload, last) = value.split_at(12);
            return match (check_digit_str(payload), last.chars().next()) {
                (Some(expected), Some(found)) if expected == found => None,
                (Some(expected), Some(found)) => {
                    Some(PglnIssue::ChecksumMismatch { expected, found })
                }
                _ => Some(PglnIssue::UnrecognizedFormat(value.to_string())),
            };
        }

        if value.starts_with(URN_SCHEME) && value.contains(PARTY_MARKER) {
            return None;
        }

        if value.starts_with(URN_SCHEME) && has_gs1_marker(value) {
            let pieces: Vec<&str> = last_segment(value).split('.').collect();
            if pieces.len() < 2 {
                return Some(PglnIssue::MissingUrnPieces);
            }
            let combined = format!("{}{}", pieces[0], pieces[1]);
            if !is_only_digits(&combined) {
                return Some(PglnIssue::NonDigitUrnPieces);
            }
            if combined.len() != 12 {
                return Some(PglnIssue::WrongUrnDigitCount {
                    actual: combined.len(),
                });
            }
            return None;
        }

        Some(PglnIssue::UnrecognizedFormat(value.to_string()))
    }

    /// The identifier exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this is a GS1 EPC URN (`:id:pgln:` or `:id:sgln:`).
    pub fn is_gs1_pgln(&self) -> bool {
        has_gs1_marker(&self.0)
    }

    /// The 13-digit GLN this identifier encodes, when it encodes one.
    ///
    /// For GS1 URNs the company prefix and location reference are
    /// concatenated and the check digit appended. Party URNs return `None`.
    pub fn gln13(&self) -> Option<String> {
        if self.is_gs1_pgln() {
            let mut pieces = last_segment(&self.0).split('.');
            let payload = format!("{}{}", pieces.next()?, pieces.next()?);
            let check = check_digit_str(&payload)?;
            Some(format!("{payload}{check}"))
        } else if self.0.len() == 13 && is_only_digits(&self.0) {
            Some(self.0.clone())
        } else {
            None
        }
    }

    /// Project this identifier onto a GS1 Digital Link path (`417/<gln>`).
    ///
    /// GS1 URNs are converted to their 13-digit GLN; every other form is
    /// appended as stored.
    pub fn to_digital_link_url(&self) -> String {
        match self.gln13() {
            Some(gln) if self.is_gs1_pgln() => format!("{DIGITAL_LINK_AI}/{gln}"),
            _ => format!("{DIGITAL_LINK_AI}/{}", self.0),
        }
    }

    fn folded_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl fmt::Display for Pgln {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_ascii_lowercase())
    }
}

impl FromStr for Pgln {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Pgln {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Pgln {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Pgln {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Pgln {}

impl Hash for Pgln {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.folded_bytes() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Pgln {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pgln {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded_bytes().cmp(other.folded_bytes())
    }
}

fn is_uri_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':')
}

fn is_only_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn has_gs1_marker(s: &str) -> bool {
    s.contains(GS1_PGLN_MARKER) || s.contains(GS1_SGLN_MARKER)
}

fn last_segment(s: &str) -> &str {
    s.rsplit(':').next().unwrap_or(s)
}
