//! # Namespace Resolution
//!
//! Turns a JSON-LD `@context` into a [`NamespaceMap`] of prefix → namespace
//! URI, and uses that map to compact absolute predicate IRIs into prefixed
//! terms (writing) or expand prefixed terms back into IRIs (reading).
//!
//! ## Merge Rules
//!
//! - An object context contributes every entry whose value is a string.
//!   Expanded term definitions (object values) are not namespaces and are
//!   skipped.
//! - An array context is scraped element by element, in order. Non-object
//!   elements (remote context URLs, nulls) are skipped.
//! - When a prefix is declared more than once, the first declaration wins.
//! - [`NamespaceMap::reverse`] keeps the first prefix seen for each URI, so
//!   `{"gs1": X, "@vocab": X}` compacts with `gs1`.
//!
//! Only this prefix subset of JSON-LD context processing is implemented.

use serde_json::Value;

/// JSON-LD keyword that declares the default vocabulary for bare terms.
pub const VOCAB_KEYWORD: &str = "@vocab";

/// Ordered prefix → URI mapping, unique by key.
///
/// The same type holds the reverse view (URI → prefix) produced by
/// [`NamespaceMap::reverse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    entries: Vec<(String, String)>,
}

impl NamespaceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrape namespaces from a JSON-LD context value.
    ///
    /// Objects and arrays of objects are scraped; every other value
    /// (including `null`) yields an empty map.
    pub fn scrape(context: &Value) -> Self {
        let mut map = Self::new();
        match context {
            Value::Object(_) => map.merge_object(context),
            Value::Array(items) => {
                for item in items {
                    map.merge_object(item);
                }
            }
            _ => {}
        }
        map
    }

    /// Scrape an optional context; `None` yields an empty map.
    pub fn scrape_optional(context: Option<&Value>) -> Self {
        context.map(Self::scrape).unwrap_or_default()
    }

    fn merge_object(&mut self, value: &Value) {
        if let Value::Object(obj) = value {
            for (prefix, uri) in obj {
                if let Value::String(uri) = uri {
                    self.insert(prefix.clone(), uri.clone());
                }
            }
        }
    }

    /// Insert an entry unless `key` is already present.
    ///
    /// Returns `true` when the entry was added.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the URI → prefix view, keeping the first prefix per URI.
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::new();
        for (prefix, uri) in &self.entries {
            reversed.insert(uri.clone(), prefix.clone());
        }
        reversed
    }

    /// Expand a document term into an absolute IRI using this map as the
    /// forward (prefix → URI) view.
    ///
    /// - Keywords (`@id`, `@type`, …) are returned unchanged.
    /// - `prefix:suffix` with a declared prefix becomes `uri + suffix`,
    ///   unless the suffix starts with `//` (already an absolute IRI).
    /// - A term without a colon expands against `@vocab` when declared.
    /// - Anything else is returned unchanged.
    pub fn expand_term(&self, term: &str) -> String {
        if term.starts_with('@') {
            return term.to_string();
        }
        match term.split_once(':') {
            Some((_, suffix)) if suffix.starts_with("//") => term.to_string(),
            Some((prefix, suffix)) => match self.get(prefix) {
                Some(uri) => format!("{uri}{suffix}"),
                None => term.to_string(),
            },
            None => match self.get(VOCAB_KEYWORD) {
                Some(vocab) => format!("{vocab}{term}"),
                None => term.to_string(),
            },
        }
    }

    /// Compact an absolute IRI using this map as the reverse (URI → prefix)
    /// view.
    ///
    /// The longest namespace that is a proper prefix of `iri` is used,
    /// skipping any whose remainder starts with `//` (such a term would
    /// read back as an absolute IRI).
    /// `@vocab` namespaces yield a bare term; other keyword-named entries
    /// are ignored. IRIs with no matching namespace are returned unchanged.
    pub fn compact_iri(&self, iri: &str) -> String {
        if iri.starts_with('@') {
            return iri.to_string();
        }
        let best = self
            .entries
            .iter()
            .filter(|(uri, prefix)| {
                !uri.is_empty()
                    && iri.len() > uri.len()
                    && iri.starts_with(uri.as_str())
                    && !iri[uri.len()..].starts_with("//")
                    && (prefix == VOCAB_KEYWORD || !prefix.starts_with('@'))
            })
            .max_by_key(|(uri, _)| uri.len());

        match best {
            Some((uri, prefix)) if prefix == VOCAB_KEYWORD => iri[uri.len()..].to_string(),
            Some((uri, prefix)) => format!("{prefix}:{}", &iri[uri.len()..]),
            None => iri.to_string(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NamespaceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Map;

    fn context_object() -> impl Strategy<Value = Value> {
        prop::collection::vec(("[a-z]{1,4}", "urn:[a-z]{1,4}:"), 0..6).prop_map(|pairs| {
            let map: Map<String, Value> = pairs
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            Value::Object(map)
        })
    }

    proptest! {
        /// Scraping an array equals merging its objects one by one, first wins.
        #[test]
        fn array_scrape_is_first_wins_merge(objects in prop::collection::vec(context_object(), 0..4)) {
            let merged = NamespaceMap::scrape(&Value::Array(objects.clone()));
            for obj in &objects {
                for (k, _) in NamespaceMap::scrape(obj).iter() {
                    let first = objects
                        .iter()
                        .find_map(|o| NamespaceMap::scrape(o).get(k).map(str::to_string));
                    prop_assert_eq!(merged.get(k).map(str::to_string), first);
                }
            }
        }

        /// A compacted IRI expands back to the original.
        #[test]
        fn compact_then_expand_is_identity(ctx in context_object(), local in "[a-zA-Z][a-zA-Z0-9]{0,8}") {
            let forward = NamespaceMap::scrape(&ctx);
            let reverse = forward.reverse();
            for (_, uri) in forward.iter() {
                let iri = format!("{uri}{local}");
                let compacted = reverse.compact_iri(&iri);
                prop_assert_eq!(forward.expand_term(&compacted), iri);
            }
        }
    }
}
