//! # Master-Data Diagnostics
//!
//! Checks applied to what a master-data resolver hands back for a query:
//!
//! - [`check_master_data_json`] inspects the raw response body. It must be
//!   JSON, should be an object, and is expected to look like JSON-LD.
//! - [`check_master_data_response`] compares the resolved element against
//!   the identifier that was asked for.
//!
//! Neither check fails; each returns the [`Diagnostic`]s it found, empty
//! when the response is clean.

use std::fmt;

use serde_json::Value;

use tracevocab_core::Pgln;

use crate::gs1::{Location, TradeItem, TradingParty};

/// Rule key of [`check_master_data_json`].
pub const MD_JSON_SCHEMA_RULE: &str = "MD_JSON_SCHEMA";

/// Rule key of [`check_master_data_response`].
pub const MD_VALID_RESPONSE_RULE: &str = "MD_VALID_RESPONSE";

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The body is not the shape master data should have.
    Schema,
    /// The body parsed but answers a different question than was asked.
    BusinessRule,
}

/// One finding from a master-data check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    /// Key of the rule that raised it.
    pub rule: &'static str,
    pub message: String,
}

impl Diagnostic {
    fn new(
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        rule: &'static str,
        message: impl Into<String>,
    ) -> Self {
        let d = Self {
            level,
            kind,
            rule,
            message: message.into(),
        };
        tracing::debug!(rule = d.rule, level = %d.level, message = %d.message, "master-data diagnostic");
        d
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.level, self.rule, self.message)
    }
}

/// Inspect a raw master-data response body.
///
/// Text that is not JSON yields an error. JSON that is not an object yields
/// a warning. An object with neither `@context` nor `@type` yields an info
/// note, since it is unlikely to be GS1 Web Vocabulary JSON-LD.
pub fn check_master_data_json(text: &str) -> Vec<Diagnostic> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            return vec![Diagnostic::new(
                DiagnosticLevel::Error,
                DiagnosticKind::Schema,
                MD_JSON_SCHEMA_RULE,
                format!("invalid JSON in master-data response: {e}"),
            )]
        }
    };
    let Some(obj) = value.as_object() else {
        return vec![Diagnostic::new(
            DiagnosticLevel::Warning,
            DiagnosticKind::Schema,
            MD_JSON_SCHEMA_RULE,
            "master-data JSON is not an object",
        )];
    };
    if !obj.contains_key("@context") && !obj.contains_key("@type") {
        return vec![Diagnostic::new(
            DiagnosticLevel::Info,
            DiagnosticKind::Schema,
            MD_JSON_SCHEMA_RULE,
            "master-data JSON has neither @context nor @type",
        )];
    }
    Vec::new()
}

/// The identifier a master-data query was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterDataQuery {
    /// Party GLN; answered by a [`TradingParty`].
    Pgln(Pgln),
    /// Location GLN; answered by a [`Location`].
    Gln(Pgln),
    /// GTIN; answered by a [`TradeItem`].
    Gtin(String),
}

/// A resolved master-data element.
#[derive(Debug, Clone, Copy)]
pub enum MasterDataItem<'a> {
    TradingParty(&'a TradingParty),
    Location(&'a Location),
    TradeItem(&'a TradeItem),
}

impl MasterDataItem<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            Self::TradingParty(_) => "TradingParty",
            Self::Location(_) => "Location",
            Self::TradeItem(_) => "TradeItem",
        }
    }
}

/// Check that `item` answers `query`.
///
/// A missing item is a warning. An item of the wrong type, or one whose
/// identifier is absent or differs from the queried one, is an error.
/// PGLN and GLN comparison ignores ASCII case; GTINs are compared after
/// trimming surrounding whitespace.
pub fn check_master_data_response(
    query: &MasterDataQuery,
    item: Option<MasterDataItem<'_>>,
) -> Vec<Diagnostic> {
    let Some(item) = item else {
        return vec![Diagnostic::new(
            DiagnosticLevel::Warning,
            DiagnosticKind::BusinessRule,
            MD_VALID_RESPONSE_RULE,
            "master-data item returned is empty",
        )];
    };
    let mismatch = |message: String| {
        vec![Diagnostic::new(
            DiagnosticLevel::Error,
            DiagnosticKind::BusinessRule,
            MD_VALID_RESPONSE_RULE,
            message,
        )]
    };
    let wrong_type = |expected: &str, query_kind: &str| {
        mismatch(format!(
            "expected {expected} for a {query_kind} query, got {}",
            item.type_name()
        ))
    };

    match (query, item) {
        (MasterDataQuery::Pgln(pgln), MasterDataItem::TradingParty(party)) => {
            match &party.party_gln {
                Some(found) if found == pgln => Vec::new(),
                found => mismatch(format!(
                    "TradingParty PGLN ({}) does not match queried PGLN ({pgln})",
                    display_opt(found.as_ref())
                )),
            }
        }
        (MasterDataQuery::Gln(gln), MasterDataItem::Location(location)) => match &location.gln {
            Some(found) if found == gln => Vec::new(),
            found => mismatch(format!(
                "Location GLN ({}) does not match queried GLN ({gln})",
                display_opt(found.as_ref())
            )),
        },
        (MasterDataQuery::Gtin(gtin), MasterDataItem::TradeItem(trade_item)) => {
            match trade_item.gtin.as_deref() {
                Some(found) if found.trim() == gtin.trim() => Vec::new(),
                found => mismatch(format!(
                    "TradeItem GTIN ({}) does not match queried GTIN ({gtin})",
                    display_opt(found)
                )),
            }
        }
        (MasterDataQuery::Pgln(_), _) => wrong_type("TradingParty", "PGLN"),
        (MasterDataQuery::Gln(_), _) => wrong_type("Location", "GLN"),
        (MasterDataQuery::Gtin(_), _) => wrong_type("TradeItem", "GTIN"),
    }
}

fn display_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pgln(s: &str) -> Pgln {
        Pgln::new(s).unwrap()
    }

    #[test]
    fn json_check_rejects_non_json() {
        let out = check_master_data_json("{not json");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Error);
        assert_eq!(out[0].kind, DiagnosticKind::Schema);
        assert_eq!(out[0].rule, MD_JSON_SCHEMA_RULE);
        assert!(out[0].message.starts_with("invalid JSON"), "{}", out[0]);
    }

    #[test]
    fn json_check_warns_on_non_object() {
        for text in ["[1, 2]", "\"x\"", "null"] {
            let out = check_master_data_json(text);
            assert_eq!(out.len(), 1, "{text}");
            assert_eq!(out[0].level, DiagnosticLevel::Warning, "{text}");
        }
    }

    #[test]
    fn json_check_notes_missing_json_ld_markers() {
        let out = check_master_data_json(r#"{"organizationName": "Acme"}"#);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Info);
        assert!(out[0].message.contains("@context"));
    }

    #[test]
    fn json_check_accepts_either_marker() {
        assert!(check_master_data_json(r#"{"@context": {}}"#).is_empty());
        assert!(check_master_data_json(r#"{"@type": "gs1:Organization"}"#).is_empty());
    }

    #[test]
    fn response_check_matches_party_gln_ignoring_case() {
        let party = TradingParty {
            party_gln: Some(pgln("urn:gdst:Example.org:party:ACME.1")),
            ..Default::default()
        };
        let query = MasterDataQuery::Pgln(pgln("urn:gdst:example.org:party:acme.1"));
        assert!(check_master_data_response(&query, Some(MasterDataItem::TradingParty(&party))).is_empty());
    }

    #[test]
    fn response_check_flags_wrong_party_gln() {
        let party = TradingParty {
            party_gln: Some(pgln("0614141000012")),
            ..Default::default()
        };
        let query = MasterDataQuery::Pgln(pgln("urn:gdst:example.org:party:acme.1"));
        let out = check_master_data_response(&query, Some(MasterDataItem::TradingParty(&party)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Error);
        assert_eq!(out[0].kind, DiagnosticKind::BusinessRule);
        assert_eq!(out[0].rule, MD_VALID_RESPONSE_RULE);
        assert!(out[0].message.contains("0614141000012"), "{}", out[0]);
    }

    #[test]
    fn response_check_flags_party_without_gln() {
        let party = TradingParty::default();
        let query = MasterDataQuery::Pgln(pgln("0614141000012"));
        let out = check_master_data_response(&query, Some(MasterDataItem::TradingParty(&party)));
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("(none)"), "{}", out[0]);
    }

    #[test]
    fn response_check_compares_location_gln() {
        let location = Location {
            gln: Some(pgln("0614141000012")),
            ..Default::default()
        };
        let hit = MasterDataQuery::Gln(pgln("0614141000012"));
        assert!(check_master_data_response(&hit, Some(MasterDataItem::Location(&location))).is_empty());

        let miss = MasterDataQuery::Gln(pgln("0614141000029"));
        let out = check_master_data_response(&miss, Some(MasterDataItem::Location(&location)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Error);
    }

    #[test]
    fn response_check_compares_trade_item_gtin() {
        let item = TradeItem {
            gtin: Some("00614141000018".into()),
            ..Default::default()
        };
        let hit = MasterDataQuery::Gtin("00614141000018".into());
        assert!(check_master_data_response(&hit, Some(MasterDataItem::TradeItem(&item))).is_empty());

        let miss = MasterDataQuery::Gtin("00614141000025".into());
        assert_eq!(
            check_master_data_response(&miss, Some(MasterDataItem::TradeItem(&item))).len(),
            1
        );
    }

    #[test]
    fn response_check_flags_wrong_element_type() {
        let location = Location::default();
        let query = MasterDataQuery::Gtin("00614141000018".into());
        let out = check_master_data_response(&query, Some(MasterDataItem::Location(&location)));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Error);
        assert_eq!(
            out[0].message,
            "expected TradeItem for a GTIN query, got Location"
        );
    }

    #[test]
    fn response_check_warns_on_missing_item() {
        let query = MasterDataQuery::Gln(pgln("0614141000012"));
        let out = check_master_data_response(&query, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(DiagnosticLevel::Info < DiagnosticLevel::Warning);
        assert!(DiagnosticLevel::Warning < DiagnosticLevel::Error);
        let d = check_master_data_json("[]").remove(0);
        assert_eq!(d.to_string(), "warning [MD_JSON_SCHEMA] master-data JSON is not an object");
    }
}
