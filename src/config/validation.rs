use crate::config::types::{CategoryConfig, Config, DocumentConfig, FetchConfig, OutputConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    validate_document_config(&config.document)?;
    validate_categories(&config.categories)?;
    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.page_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.asset_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "asset_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.assets_dir.is_empty() || config.assets_dir.contains("..") {
        return Err(ConfigError::Validation(format!(
            "assets_dir must be a plain relative name, got '{}'",
            config.assets_dir
        )));
    }

    if config.schema_file.is_empty() {
        return Err(ConfigError::Validation(
            "schema_file cannot be empty".to_string(),
        ));
    }

    if !is_yaml_name(&config.combined_file) {
        return Err(ConfigError::Validation(format!(
            "combined_file must end in .yaml or .yml, got '{}'",
            config.combined_file
        )));
    }

    Ok(())
}

fn validate_document_config(config: &DocumentConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("course", &config.course),
        ("version", &config.version),
        ("source", &config.source),
        ("id_prefix", &config.id_prefix),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
    }

    if !is_id_segment(&config.id_prefix) {
        return Err(ConfigError::Validation(format!(
            "id_prefix must be lowercase letters and digits separated by single hyphens, got '{}'",
            config.id_prefix
        )));
    }

    Ok(())
}

fn validate_categories(categories: &[CategoryConfig]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut codes = HashSet::new();
    for category in categories {
        validate_category_name(&category.name)?;

        if !seen.insert(category.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category '{}'",
                category.name
            )));
        }

        let url = Url::parse(&category.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid URL for '{}': {}", category.name, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "URL for '{}' must use http or https, got '{}'",
                category.name,
                url.scheme()
            )));
        }

        let code = category.id_code();
        if !is_id_segment(&code) {
            return Err(ConfigError::Validation(format!(
                "category code for '{}' must be lowercase letters and digits separated by single hyphens, got '{}'",
                category.name, code
            )));
        }

        if !codes.insert(code.clone()) {
            return Err(ConfigError::Validation(format!(
                "category code '{}' of '{}' is already used; set a distinct `code`",
                code, category.name
            )));
        }
    }

    Ok(())
}

/// Category names become file names, so keep them to `[a-z0-9-]`
fn validate_category_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "category name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "category name must contain only lowercase letters, digits and hyphens, got '{}'",
            name
        )));
    }

    Ok(())
}

/// Question ids are `<prefix>-<code>-NNN` and must match `^[a-z0-9]+(-[a-z0-9]+)*-[0-9]{3,}$`
fn is_id_segment(value: &str) -> bool {
    value.split('-').all(|part| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}

fn is_yaml_name(name: &str) -> bool {
    [".yaml", ".yml"]
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext))
}
