//! Document validation
//!
//! A document is checked in two passes: generic schema conformance (all
//! errors collected), then the domain rules in [`invariants`]. It is valid
//! only if both passes report nothing. Load failures (missing schema,
//! unreadable or malformed files) are fatal and returned as
//! [`ValidateError`](crate::ValidateError).

pub mod invariants;
mod report;
mod schema;

pub use invariants::check_invariants;
pub use report::{DirectoryReport, ValidationReport};
pub use schema::{Schema, BUNDLED_SCHEMA};

use crate::{ValidateError, ValidateResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Validates an already-loaded document
///
/// Without a schema only the domain rules run.
pub fn validate_value(document: &Value, doc_dir: &Path, schema: Option<&Schema>) -> ValidationReport {
    let mut errors = match schema {
        Some(schema) => schema.check(document),
        None => Vec::new(),
    };
    errors.extend(check_invariants(document, doc_dir));
    ValidationReport { errors }
}

/// Loads a YAML document and validates it
///
/// Asset paths are resolved against the document's own directory.
pub fn validate_file(path: &Path, schema: Option<&Schema>) -> ValidateResult<ValidationReport> {
    let document = load_value(path)?;
    let doc_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(validate_value(&document, doc_dir, schema))
}

/// Validates every `*.yaml` / `*.yml` file in `dir` against `dir/<schema_file>`
pub fn validate_directory(dir: &Path, schema_file: &str) -> ValidateResult<DirectoryReport> {
    let schema_path = dir.join(schema_file);
    let schema = Schema::load(&schema_path)?;
    tracing::info!("Loaded schema from {}", schema_path.display());

    let files = find_documents(dir)?;
    if files.is_empty() {
        return Err(ValidateError::NoDocuments(dir.to_path_buf()));
    }
    tracing::info!("Found {} YAML file(s) to validate", files.len());

    let mut report = DirectoryReport::default();
    for file in files {
        tracing::info!("Validating {}...", file.display());
        let result = validate_file(&file, Some(&schema))?;
        report.results.push((file, result));
    }

    Ok(report)
}

/// Writes the bundled schema to `path`, creating parent directories
pub fn write_bundled_schema(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BUNDLED_SCHEMA)
}

fn load_value(path: &Path) -> ValidateResult<Value> {
    let content = fs::read_to_string(path).map_err(|source| ValidateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ValidateError::DocumentYaml {
        path: path.to_path_buf(),
        source,
    })
}

fn find_documents(dir: &Path) -> ValidateResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ValidateError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml")
            )
        })
        .collect();
    files.sort();
    Ok(files)
}
