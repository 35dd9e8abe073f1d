//! sbf-questions: SBF-See exam question scraper and validator
//!
//! This crate scrapes multiple-choice boating-license exam questions from the
//! ELWIS question catalogue pages, writes them as YAML documents, and validates
//! those documents against a JSON Schema plus a few domain rules.

pub mod config;
pub mod document;
pub mod scrape;
pub mod validate;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scrape runs
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Fatal errors of a validation run
///
/// Content problems inside a document are never reported through this type;
/// they are collected in a [`validate::ValidationReport`].
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("Schema file not found at {}", .0.display())]
    SchemaNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed schema JSON in {}: {source}", path.display())]
    SchemaJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid schema: {0}")]
    SchemaCompile(String),

    #[error("Malformed YAML in {}: {source}", path.display())]
    DocumentYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("No YAML files found in {}", .0.display())]
    NoDocuments(PathBuf),
}

/// Result type alias for validation runs
pub type ValidateResult<T> = std::result::Result<T, ValidateError>;

// Re-export commonly used types
pub use config::Config;
pub use document::{AnswerOption, Document, QuestionRecord};
pub use scrape::{extract_questions, run_scrape, ExtractionReport};
pub use validate::{validate_file, Schema, ValidationReport};
