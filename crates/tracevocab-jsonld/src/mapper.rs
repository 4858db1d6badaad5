//! # JSON-LD Mapper
//!
//! Converts [`VocabularyElement`]s to compacted JSON-LD documents and back.
//!
//! ## Writing
//!
//! 1. The effective context is the element's own context, or the mapper's
//!    default context when the element has none. The element itself is not
//!    modified; callers who want the default recorded on their object call
//!    [`JsonLdMapper::apply_default_context`].
//! 2. The reverse namespace map of the effective context compacts every
//!    bound predicate (and the `@type` IRI) into a prefixed term.
//! 3. `@context` is emitted first, followed by `@type` and the bound terms
//!    in binding order. Unbound fields and nulls are not emitted.
//!
//! ## Reading
//!
//! 1. The document must be an object with an `@context`.
//! 2. Keys are expanded through the forward namespace map of that context
//!    and matched against the binding predicates. Unmatched keys are
//!    ignored.
//! 3. The rebuilt field-keyed tree is deserialized with serde, so validating
//!    field types (such as [`tracevocab_core::Pgln`]) reject bad values here.
//! 4. The parsed `@context` is stored on the result.

use serde_json::{Map, Value};

use crate::binding::{ClassBinding, VocabularyElement};
use crate::error::MappingError;
use crate::namespace::NamespaceMap;

const CONTEXT_KEY: &str = "@context";
const TYPE_KEY: &str = "@type";

/// A JSON-LD mapper configured with a default context.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonLdMapper {
    default_context: Value,
}

impl JsonLdMapper {
    /// Create a mapper that falls back to `default_context` for elements
    /// without a context.
    pub fn new(default_context: Value) -> Self {
        Self { default_context }
    }

    /// The context used for elements that carry none.
    pub fn default_context(&self) -> &Value {
        &self.default_context
    }

    /// The context `element` will be written with.
    pub fn effective_context<'a, T: VocabularyElement>(&'a self, element: &'a T) -> &'a Value {
        match element.context() {
            Some(ctx) if !ctx.is_null() => ctx,
            _ => &self.default_context,
        }
    }

    /// Assign the default context to `element` if it has none.
    ///
    /// Returns `true` when the element was changed.
    pub fn apply_default_context<T: VocabularyElement>(&self, element: &mut T) -> bool {
        if element.context().is_some_and(|ctx| !ctx.is_null()) {
            return false;
        }
        element.set_context(Some(self.default_context.clone()));
        true
    }

    /// Map `element` to a JSON-LD document tree.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MappingFailure`] if the element does not
    /// serialize to a JSON object, and [`MappingError::Json`] if serde
    /// serialization fails.
    pub fn to_json_ld_value<T: VocabularyElement>(&self, element: &T) -> Result<Value, MappingError> {
        let context = self.effective_context(element);
        let reverse = NamespaceMap::scrape(context).reverse();

        let fields = match serde_json::to_value(element).map_err(|e| MappingError::from(e).logged())? {
            Value::Object(fields) => fields,
            other => {
                return Err(MappingError::MappingFailure(format!(
                    "expected an object when mapping into JSON-LD, got {}",
                    json_kind(&other)
                ))
                .logged())
            }
        };

        let body = compact_node(fields, T::BINDING, &reverse);

        let mut document = Map::with_capacity(body.len() + 1);
        document.insert(CONTEXT_KEY.to_string(), context.clone());
        document.extend(body);
        Ok(Value::Object(document))
    }

    /// Map `element` to JSON-LD text.
    ///
    /// # Errors
    ///
    /// See [`JsonLdMapper::to_json_ld_value`].
    pub fn to_json_ld<T: VocabularyElement>(&self, element: &T) -> Result<String, MappingError> {
        let document = self.to_json_ld_value(element)?;
        serde_json::to_string(&document).map_err(|e| MappingError::from(e).logged())
    }

    /// Map a parsed JSON-LD document tree to a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MappingFailure`] if the document is not an
    /// object or does not fit `T`, and [`MappingError::MissingContext`] if
    /// it has no `@context`.
    pub fn from_json_ld_value<T: VocabularyElement>(&self, document: Value) -> Result<T, MappingError> {
        let mut document = match document {
            Value::Object(document) => document,
            other => {
                return Err(MappingError::MappingFailure(format!(
                    "a JSON-LD document must be an object, got {}",
                    json_kind(&other)
                ))
                .logged())
            }
        };

        let context = match document.remove(CONTEXT_KEY) {
            Some(ctx) if !ctx.is_null() => ctx,
            _ => {
                return Err(MappingError::MissingContext(
                    Value::Object(document).to_string(),
                )
                .logged())
            }
        };

        let forward = NamespaceMap::scrape(&context);
        let fields = expand_node(document, T::BINDING, &forward);

        let mut element: T = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            MappingError::MappingFailure(format!("document does not fit the target type: {e}"))
                .logged()
        })?;
        element.set_context(Some(context));
        Ok(element)
    }

    /// Parse JSON-LD text and map it to a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MappingFailure`] if `text` is not JSON, plus
    /// everything [`JsonLdMapper::from_json_ld_value`] returns.
    pub fn from_json_ld<T: VocabularyElement>(&self, text: &str) -> Result<T, MappingError> {
        let document: Value = serde_json::from_str(text).map_err(|e| {
            MappingError::MappingFailure(format!("document is not valid JSON: {e}")).logged()
        })?;
        self.from_json_ld_value(document)
    }
}

/// Rename bound fields to compacted predicates, recursing into nested nodes.
fn compact_node(mut fields: Map<String, Value>, binding: &ClassBinding, reverse: &NamespaceMap) -> Map<String, Value> {
    let mut out = Map::new();
    if let Some(type_iri) = binding.type_iri {
        out.insert(TYPE_KEY.to_string(), Value::String(reverse.compact_iri(type_iri)));
    }
    for term in binding.terms {
        let Some(value) = fields.remove(term.field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let value = match term.nested {
            Some(nested) => map_nested(value, |obj| compact_node(obj, nested, reverse)),
            None => value,
        };
        out.insert(reverse.compact_iri(term.predicate), value);
    }
    out
}

/// Rename expanded predicates back to field names, recursing into nested
/// nodes. `@type` and unbound terms are dropped. When two keys expand to the
/// same predicate, the first in document order wins.
fn expand_node(node: Map<String, Value>, binding: &ClassBinding, forward: &NamespaceMap) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in node {
        if key == TYPE_KEY || key == CONTEXT_KEY {
            continue;
        }
        let predicate = forward.expand_term(&key);
        let Some(term) = binding.term_for_predicate(&predicate) else {
            tracing::debug!(term = %key, predicate = %predicate, "ignoring unbound JSON-LD term");
            continue;
        };
        if out.contains_key(term.field) {
            tracing::warn!(
                term = %key,
                predicate = %predicate,
                "duplicate JSON-LD term for an already mapped predicate, keeping the first"
            );
            continue;
        }
        let value = match term.nested {
            Some(nested) => map_nested(value, |obj| expand_node(obj, nested, forward)),
            None => value,
        };
        out.insert(term.field.to_string(), value);
    }
    out
}

/// Apply `f` to an object value, or to each object element of an array.
fn map_nested<F>(value: Value, f: F) -> Value
where
    F: Fn(Map<String, Value>) -> Map<String, Value>,
{
    match value {
        Value::Object(obj) => Value::Object(f(obj)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(obj) => Value::Object(f(obj)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
