//! Configuration module
//!
//! Loads an optional TOML file on top of the built-in ELWIS defaults and
//! validates the result. The resulting [`Config`] is passed by reference into
//! every stage of a run.
//!
//! # Example
//!
//! ```no_run
//! use sbf_questions::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sbf.toml")).unwrap();
//! println!("Writing to {}", config.output.directory.display());
//! ```

mod parser;
mod types;
mod validation;

pub use types::{AssetConfig, CategoryConfig, Config, DocumentConfig, FetchConfig, OutputConfig};

pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
