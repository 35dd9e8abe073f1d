//! Draft-07 JSON Schema loading and conformance checks

use crate::{ValidateError, ValidateResult};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::path::Path;

/// The schema shipped with the crate
pub const BUNDLED_SCHEMA: &str = include_str!("../../schema/questions.schema.json");

/// A compiled document schema
pub struct Schema {
    compiled: JSONSchema,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema").finish_non_exhaustive()
    }
}

impl Schema {
    /// Compiles a schema value as draft-07
    pub fn from_value(value: &Value) -> ValidateResult<Self> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(value)
            .map_err(|e| ValidateError::SchemaCompile(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Reads and compiles a schema file
    ///
    /// A missing file, unreadable file, malformed JSON, or an invalid schema
    /// are all fatal.
    pub fn load(path: &Path) -> ValidateResult<Self> {
        if !path.exists() {
            return Err(ValidateError::SchemaNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ValidateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ValidateError::SchemaJson {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(&value)
    }

    /// The bundled schema, compiled
    pub fn bundled() -> ValidateResult<Self> {
        let value: Value = serde_json::from_str(BUNDLED_SCHEMA)
            .map_err(|e| ValidateError::SchemaCompile(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Every conformance error, as `<dotted.path>: <message>`
    pub fn check(&self, instance: &Value) -> Vec<String> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    format!(
                        "{}: {}",
                        dotted_path(&error.instance_path.to_string()),
                        error
                    )
                })
                .collect(),
        }
    }
}

/// `/questions/3/options` becomes `questions.3.options`
fn dotted_path(pointer: &str) -> String {
    let path = pointer.trim_start_matches('/').replace('/', ".");
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path
    }
}
