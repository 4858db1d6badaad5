//! # Schema Checking
//!
//! Validates JSON documents against named JSON Schema profiles
//! (Draft 2020-12 unless a schema declares otherwise).
//!
//! ## Profiles
//!
//! A profile is a schema registered under a short name. [`SchemaChecker::new`]
//! loads every `*.schema.json` file in a directory and names each profile
//! after its file name without the `.schema.json` suffix, so
//! `gs1-location.schema.json` becomes the `gs1-location` profile.
//! [`SchemaChecker::with_profile`] registers in-memory schemas.
//!
//! ## Schema Resolution
//!
//! Cross-schema `$ref`s resolve only against registered profiles, matched
//! by `$id`, by file name, or by profile name. Nothing is fetched over the
//! network; an unresolvable reference fails the validator build.
//!
//! ## Reports
//!
//! Checking never fails because a document is invalid. The
//! [`SchemaReport`] lists each violation as `"<instance path> :: <message>"`
//! in evaluation order, with duplicates removed. `Err` is reserved for
//! problems with the inputs themselves (unknown profile, unparseable
//! document, broken schema).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

const SCHEMA_SUFFIX: &str = ".schema.json";

/// Errors raised by [`SchemaChecker`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// No schema is registered under this profile name.
    #[error("unknown schema profile '{0}'")]
    UnknownProfile(String),

    /// A schema file could not be read or parsed.
    #[error("schema load error for '{schema}': {reason}")]
    SchemaLoad {
        /// File or profile name.
        schema: String,
        /// Why loading failed.
        reason: String,
    },

    /// A schema parsed but could not be compiled.
    #[error("validator build error for profile '{profile}': {reason}")]
    ValidatorBuild {
        /// Profile name.
        profile: String,
        /// Why compilation failed.
        reason: String,
    },

    /// The document to check is not JSON.
    #[error("document is not valid JSON: {0}")]
    InvalidDocument(String),

    /// IO error while reading a schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of checking one document against one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// True when the document satisfies the schema.
    pub valid: bool,
    /// Violations as `"<instance path> :: <message>"`, in evaluation order.
    pub errors: Vec<String>,
}

impl SchemaReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        write!(f, "invalid ({} errors)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

/// Resolves `$ref` URIs against the registered profiles only.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        let profile = filename.strip_suffix(SCHEMA_SUFFIX).unwrap_or(filename);
        for key in [filename, profile] {
            if let Some(value) = self.schemas_by_uri.get(key) {
                return Ok(value.clone());
            }
        }

        tracing::warn!(uri = %uri_str, "unresolved schema reference");
        Err(format!("schema '{uri_str}' is not registered locally").into())
    }
}

/// Checks JSON documents against named schema profiles.
///
/// Compiled validators are cached per profile, so repeated checks against
/// the same profile compile its schema once. `SchemaChecker` is
/// `Send + Sync` and can be shared across threads.
pub struct SchemaChecker {
    schema_dir: Option<PathBuf>,
    schemas: BTreeMap<String, Value>,
    cache: RwLock<HashMap<String, Arc<Validator>>>,
}

impl fmt::Debug for SchemaChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaChecker")
            .field("schema_dir", &self.schema_dir)
            .field("profiles", &self.profiles())
            .field("compiled", &self.cache.read().len())
            .finish()
    }
}

impl Default for SchemaChecker {
    fn default() -> Self {
        Self::empty()
    }
}

impl SchemaChecker {
    /// A checker with no profiles.
    pub fn empty() -> Self {
        Self {
            schema_dir: None,
            schemas: BTreeMap::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load every `*.schema.json` file in `schema_dir` as a profile.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if the directory cannot be read
    /// or a schema file is not JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut checker = Self::empty();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::SchemaLoad {
            schema: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(profile) = name.strip_suffix(SCHEMA_SUFFIX) else {
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| {
                let err = SchemaError::SchemaLoad {
                    schema: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                };
                tracing::warn!(error = %err, "schema file is not JSON");
                err
            })?;
            tracing::debug!(profile, path = %path.display(), "loaded schema");
            checker.schemas.insert(profile.to_string(), value);
        }

        tracing::info!(
            dir = %schema_dir.display(),
            count = checker.schemas.len(),
            "schema profiles loaded"
        );
        checker.schema_dir = Some(schema_dir);
        Ok(checker)
    }

    /// Register `schema` under `profile`, replacing any existing profile of
    /// that name.
    pub fn with_profile(mut self, profile: impl Into<String>, schema: Value) -> Self {
        self.add_profile(profile, schema);
        self
    }

    /// Register `schema` under `profile` in place.
    ///
    /// Every cached validator is dropped, since any of them may reference
    /// the replaced schema.
    pub fn add_profile(&mut self, profile: impl Into<String>, schema: Value) {
        self.schemas.insert(profile.into(), schema);
        self.cache.get_mut().clear();
    }

    /// The directory profiles were loaded from, if any.
    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }

    /// Registered profile names, sorted.
    pub fn profiles(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// The schema registered under `profile`.
    pub fn schema(&self, profile: &str) -> Option<&Value> {
        self.schemas.get(profile)
    }

    /// Check JSON text against `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDocument`] if `document` is not JSON,
    /// plus everything [`SchemaChecker::check_value`] returns.
    pub fn is_valid(&self, document: &str, profile: &str) -> Result<SchemaReport, SchemaError> {
        let instance: Value = serde_json::from_str(document).map_err(|e| {
            let err = SchemaError::InvalidDocument(e.to_string());
            tracing::warn!(profile, error = %err, "schema check rejected input");
            err
        })?;
        self.check_value(&instance, profile)
    }

    /// Check a parsed JSON value against `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownProfile`] if no such profile is
    /// registered and [`SchemaError::ValidatorBuild`] if its schema does not
    /// compile.
    pub fn check_value(&self, instance: &Value, profile: &str) -> Result<SchemaReport, SchemaError> {
        let validator = self.validator(profile)?;

        let mut seen = HashSet::new();
        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format_violation(&e.instance_path.to_string(), &e.to_string()))
            .filter(|line| seen.insert(line.clone()))
            .collect();

        if !errors.is_empty() {
            tracing::debug!(profile, count = errors.len(), "document failed schema check");
        }
        Ok(SchemaReport::from_errors(errors))
    }

    /// The compiled validator for `profile`, compiling it on first use.
    fn validator(&self, profile: &str) -> Result<Arc<Validator>, SchemaError> {
        if let Some(validator) = self.cache.read().get(profile) {
            return Ok(Arc::clone(validator));
        }

        let schema = self.schemas.get(profile).ok_or_else(|| {
            let err = SchemaError::UnknownProfile(profile.to_string());
            tracing::warn!(error = %err, "schema check rejected input");
            err
        })?;

        let validator = self.build_options().build(schema).map_err(|e| {
            let err = SchemaError::ValidatorBuild {
                profile: profile.to_string(),
                reason: e.to_string(),
            };
            tracing::error!(error = %err, "schema failed to compile");
            err
        })?;

        let validator = Arc::new(validator);
        self.cache
            .write()
            .entry(profile.to_string())
            .or_insert_with(|| Arc::clone(&validator));
        Ok(validator)
    }

    /// Options with a retriever over every registered profile, indexed by
    /// `$id`, file name and profile name.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (profile, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(format!("{profile}{SCHEMA_SUFFIX}"), value.clone());
            schemas_by_uri.insert(profile.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }
}

fn format_violation(instance_path: &str, message: &str) -> String {
    let path = if instance_path.is_empty() {
        "(root)"
    } else {
        instance_path
    };
    format!("{path} :: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "age": {"type": "integer", "minimum": 0}
            }
        })
    }

    fn checker() -> SchemaChecker {
        SchemaChecker::empty().with_profile("person", person_schema())
    }

    #[test]
    fn valid_document_has_no_errors() {
        let report = checker().is_valid(r#"{"name": "Ana", "age": 3}"#, "person").unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.to_string(), "valid");
    }

    #[test]
    fn errors_name_the_instance_path() {
        let report = checker().is_valid(r#"{"name": "", "age": -1}"#, "person").unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2, "{report}");
        assert!(report.errors.iter().any(|e| e.starts_with("/name :: ")), "{report:?}");
        assert!(report.errors.iter().any(|e| e.starts_with("/age :: ")), "{report:?}");
    }

    #[test]
    fn root_errors_are_labelled() {
        let report = checker().is_valid("{}", "person").unwrap();
        assert!(!report.valid);
        assert!(report.errors[0].starts_with("(root) :: "), "{report:?}");
        assert!(report.errors[0].contains("name"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = checker().is_valid("{}", "nobody").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownProfile(ref p) if p == "nobody"));
    }

    #[test]
    fn non_json_document_is_an_error() {
        let err = checker().is_valid("{not json", "person").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDocument(_)), "{err}");
    }

    #[test]
    fn broken_schema_fails_to_build() {
        let c = SchemaChecker::empty().with_profile("bad", json!({"type": 12}));
        let err = c.is_valid("{}", "bad").unwrap_err();
        assert!(matches!(err, SchemaError::ValidatorBuild { .. }), "{err}");
    }

    #[test]
    fn references_resolve_between_profiles_only() {
        let c = SchemaChecker::empty()
            .with_profile("person", person_schema())
            .with_profile(
                "team",
                json!({
                    "type": "array",
                    "items": {"$ref": "person.schema.json"}
                }),
            );
        let report = c.is_valid(r#"[{"name": "a"}, {"age": 1}]"#, "team").unwrap();
        assert!(!report.valid);
        assert!(report.errors.iter().all(|e| e.starts_with("/1 :: ")), "{report:?}");

        let offline = SchemaChecker::empty().with_profile(
            "remote",
            json!({"$ref": "https://example.invalid/elsewhere.schema.json"}),
        );
        let err = offline.is_valid("{}", "remote").unwrap_err();
        assert!(matches!(err, SchemaError::ValidatorBuild { .. }), "{err}");
    }

    #[test]
    fn validators_are_cached_and_reset_on_change() {
        let mut c = checker();
        c.is_valid("{}", "person").unwrap();
        c.is_valid("{}", "person").unwrap();
        assert_eq!(c.cache.read().len(), 1);

        c.add_profile("person", json!({"type": "object"}));
        assert!(c.cache.read().is_empty());
        assert!(c.is_valid("{}", "person").unwrap().valid);
    }

    #[test]
    fn format_violation_labels_root() {
        assert_eq!(format_violation("", "boom"), "(root) :: boom");
        assert_eq!(format_violation("/a/0", "boom"), "/a/0 :: boom");
    }

    #[test]
    fn report_display_lists_errors() {
        let report = SchemaReport::from_errors(vec!["/a :: x".into(), "/b :: y".into()]);
        assert_eq!(report.to_string(), "invalid (2 errors)\n  /a :: x\n  /b :: y");
    }
}
