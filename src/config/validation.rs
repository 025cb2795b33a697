use super::models::Config;
use crate::worker::task::{URL_SLOT, sanitize_file_name};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Worker pool size must be at least 1")]
    NoWorkers,

    #[error("URL template '{template}' has no '{{}}' slot for the identifier")]
    MissingUrlSlot { template: String },

    #[error("Delimiter must be a single ASCII character, got '{delimiter}'")]
    InvalidDelimiter { delimiter: String },

    #[error("Identifier column name must not be empty")]
    EmptyIdColumn,

    #[error("Timeout must be positive: {field}")]
    ZeroTimeout { field: String },

    #[error("File prefix '{prefix}' must be non-empty and contain only letters, digits, '.', '_' or '-'")]
    InvalidFilePrefix { prefix: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_source(config)?;
    validate_fetch(config)?;
    validate_output(config)?;
    validate_pool(config)?;
    Ok(())
}

fn validate_source(config: &Config) -> Result<(), ValidationError> {
    let delimiter = &config.source.delimiter;
    if delimiter.len() != 1 || !delimiter.is_ascii() {
        return Err(ValidationError::InvalidDelimiter {
            delimiter: delimiter.clone(),
        });
    }

    if config.source.id_column.trim().is_empty() {
        return Err(ValidationError::EmptyIdColumn);
    }

    Ok(())
}

fn validate_fetch(config: &Config) -> Result<(), ValidationError> {
    if !config.fetch.url_template.contains(URL_SLOT) {
        return Err(ValidationError::MissingUrlSlot {
            template: config.fetch.url_template.clone(),
        });
    }

    if config.fetch.timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout {
            field: "fetch.timeout".to_string(),
        });
    }

    if config.fetch.connect_timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout {
            field: "fetch.connect_timeout".to_string(),
        });
    }

    Ok(())
}

/// The prefix is part of every file name, so it must already be sanitized
fn validate_output(config: &Config) -> Result<(), ValidationError> {
    let prefix = &config.output.file_prefix;
    if prefix.is_empty() || sanitize_file_name(prefix) != *prefix {
        return Err(ValidationError::InvalidFilePrefix {
            prefix: prefix.clone(),
        });
    }

    Ok(())
}

fn validate_pool(config: &Config) -> Result<(), ValidationError> {
    if config.pool.workers == 0 {
        return Err(ValidationError::NoWorkers);
    }

    Ok(())
}
