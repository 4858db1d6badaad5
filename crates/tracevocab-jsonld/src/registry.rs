//! # Vocabulary Registry
//!
//! The closed set of vocabularies this crate can map, each bound to a
//! [`JsonLdMapper`] configured with that vocabulary's default context.
//! Callers that only know a vocabulary by name (configuration, CLI flags)
//! dispatch through [`map_to_json_ld`] and [`map_from_json_ld`].
//!
//! Adding a vocabulary means adding a [`Vocabulary`] variant; every `match`
//! below is exhaustive, so the compiler points at each place to extend.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::binding::VocabularyElement;
use crate::error::MappingError;
use crate::gs1;
use crate::mapper::JsonLdMapper;

/// A registered vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vocabulary {
    /// The GS1 Web Vocabulary (<https://gs1.org/voc/>).
    Gs1WebVocab,
}

impl Vocabulary {
    /// Every registered vocabulary.
    pub fn all() -> &'static [Vocabulary] {
        &[Self::Gs1WebVocab]
    }

    /// Registry name of this vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gs1WebVocab => "GS1WebVocab",
        }
    }

    /// The mapper for this vocabulary, built on first use.
    pub fn mapper(&self) -> &'static JsonLdMapper {
        match self {
            Self::Gs1WebVocab => {
                static GS1: OnceLock<JsonLdMapper> = OnceLock::new();
                GS1.get_or_init(|| JsonLdMapper::new(gs1::default_context()))
            }
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vocabulary {
    type Err = MappingError;

    /// Names are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| MappingError::UnknownVocabulary(s.to_string()).logged())
    }
}

/// Map `element` to JSON-LD text with the mapper registered as `vocabulary`.
///
/// # Errors
///
/// Returns [`MappingError::UnknownVocabulary`] for an unregistered name,
/// otherwise whatever [`JsonLdMapper::to_json_ld`] returns.
pub fn map_to_json_ld<T: VocabularyElement>(vocabulary: &str, element: &T) -> Result<String, MappingError> {
    vocabulary.parse::<Vocabulary>()?.mapper().to_json_ld(element)
}

/// Map JSON-LD text to a `T` with the mapper registered as `vocabulary`.
///
/// # Errors
///
/// Returns [`MappingError::UnknownVocabulary`] for an unregistered name,
/// otherwise whatever [`JsonLdMapper::from_json_ld`] returns.
pub fn map_from_json_ld<T: VocabularyElement>(vocabulary: &str, text: &str) -> Result<T, MappingError> {
    vocabulary.parse::<Vocabulary>()?.mapper().from_json_ld(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gs1::TradingParty;
    use tracevocab_core::Pgln;

    #[test]
    fn names_round_trip() {
        for v in Vocabulary::all() {
            assert_eq!(v.as_str().parse::<Vocabulary>().unwrap(), *v);
            assert_eq!(v.to_string(), v.as_str());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        for name in ["", "gs1webvocab", "SchemaOrg"] {
            let err = name.parse::<Vocabulary>().unwrap_err();
            assert!(matches!(err, MappingError::UnknownVocabulary(ref n) if n == name), "{err}");
        }
    }

    #[test]
    fn mapper_is_shared() {
        let a = Vocabulary::Gs1WebVocab.mapper();
        let b = Vocabulary::Gs1WebVocab.mapper();
        assert!(std::ptr::eq(a, b));
        assert_eq!(*a.default_context(), gs1::default_context());
    }

    #[test]
    fn facade_dispatches_by_name() {
        let party = TradingParty {
            party_gln: Some(Pgln::new("urn:epc:id:pgln:0614141.00001").unwrap()),
            organization_name: Some("Example Co".to_string()),
            ..Default::default()
        };
        let text = map_to_json_ld("GS1WebVocab", &party).unwrap();
        assert!(text.contains("\"gs1:partyGLN\""), "{text}");
        let back: TradingParty = map_from_json_ld("GS1WebVocab", &text).unwrap();
        assert_eq!(back.party_gln, party.party_gln);
        assert_eq!(back.organization_name, party.organization_name);
    }

    #[test]
    fn facade_rejects_unknown_vocabulary() {
        let err = map_to_json_ld("Nope", &TradingParty::default()).unwrap_err();
        assert!(matches!(err, MappingError::UnknownVocabulary(_)));
        let err = map_from_json_ld::<TradingParty>("Nope", "{}").unwrap_err();
        assert!(matches!(err, MappingError::UnknownVocabulary(_)));
    }
}
