//! # Structural Bindings
//!
//! Static metadata binding the serde field names of a vocabulary type to
//! the predicate IRIs used in JSON-LD. The mapper only looks at a type
//! through its [`ClassBinding`] and its context attribute; it never
//! inspects fields structurally.
//!
//! Bindings are `const` items so nested bindings can reference each other
//! without any runtime registration.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Binding of one serde field to one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermBinding {
    /// Serde field name on the Rust type.
    pub field: &'static str,
    /// Absolute predicate IRI, or a JSON-LD keyword such as `@id`.
    pub predicate: &'static str,
    /// Binding applied to the field's value when it is a nested node
    /// (or to each object element when it is an array of nodes).
    pub nested: Option<&'static ClassBinding>,
}

impl TermBinding {
    /// Bind a scalar field.
    pub const fn value(field: &'static str, predicate: &'static str) -> Self {
        Self {
            field,
            predicate,
            nested: None,
        }
    }

    /// Bind a field holding a nested node.
    pub const fn node(
        field: &'static str,
        predicate: &'static str,
        binding: &'static ClassBinding,
    ) -> Self {
        Self {
            field,
            predicate,
            nested: Some(binding),
        }
    }
}

/// Binding of a whole vocabulary class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBinding {
    /// Absolute IRI emitted as `@type`, if the class has one.
    pub type_iri: Option<&'static str>,
    /// Field bindings, in output order.
    pub terms: &'static [TermBinding],
}

impl ClassBinding {
    /// Find the binding for a serde field name.
    pub fn term_for_field(&self, field: &str) -> Option<&'static TermBinding> {
        self.terms.iter().find(|t| t.field == field)
    }

    /// Find the binding for an absolute predicate IRI or keyword.
    pub fn term_for_predicate(&self, predicate: &str) -> Option<&'static TermBinding> {
        self.terms.iter().find(|t| t.predicate == predicate)
    }
}

/// A domain object that can be mapped to and from JSON-LD.
///
/// Implementors serialize with serde using the field names named in
/// [`VocabularyElement::BINDING`], and carry an optional JSON-LD context.
pub trait VocabularyElement: Serialize + DeserializeOwned {
    /// Field → predicate bindings for this type.
    const BINDING: &'static ClassBinding;

    /// The JSON-LD context this element carries, if any.
    fn context(&self) -> Option<&Value>;

    /// Replace the JSON-LD context.
    fn set_context(&mut self, context: Option<Value>);
}

/// Implement [`VocabularyElement`] for a struct with a
/// `context: Option<serde_json::Value>` field.
#[macro_export]
macro_rules! impl_vocabulary_element {
    ($ty:ty, $binding:expr) => {
        impl $crate::binding::VocabularyElement for $ty {
            const BINDING: &'static $crate::binding::ClassBinding = &$binding;

            fn context(&self) -> Option<&serde_json::Value> {
                self.context.as_ref()
            }

            fn set_context(&mut self, context: Option<serde_json::Value>) {
                self.context = context;
            }
        }
    };
}
