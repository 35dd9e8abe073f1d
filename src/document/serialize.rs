//! YAML reading and writing for question documents

use crate::document::types::Document;
use crate::ScrapeError;
use std::fs;
use std::path::Path;

/// Renders a document as block-style YAML, keys in declaration order
pub fn to_yaml(document: &Document) -> Result<String, ScrapeError> {
    Ok(serde_yaml::to_string(document)?)
}

/// Writes a document, replacing any previous file at `path`
pub fn write_document(document: &Document, path: &Path) -> Result<(), ScrapeError> {
    let yaml = to_yaml(document)?;
    fs::write(path, yaml)?;
    tracing::info!(
        "Saved {} questions to {}",
        document.questions.len(),
        path.display()
    );
    Ok(())
}

/// Reads a document back into its typed form
pub fn load_document(path: &Path) -> Result<Document, ScrapeError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
