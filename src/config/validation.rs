//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every file slot carries the `file.` prefix
//! - Check the slot count fits the registry
//! - Check the log level is recognized
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Empty file paths are valid: they are gaps in sparse numbering
//! - Missing files are not checked here; the loader skips them at load time

use thiserror::Error;

use crate::config::schema::HostConfig;
use crate::properties::registry::{MAX_SLOTS, SLOT_PREFIX};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem in the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file slot '{0}' must start with 'file.'")]
    UnrecognizedSlot(String),

    #[error("{count} file slots configured, at most {limit} allowed")]
    TooManyFiles { count: usize, limit: usize },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a parsed host configuration.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    for slot in config.loader.files.keys() {
        if !slot.starts_with(SLOT_PREFIX) {
            errors.push(ValidationError::UnrecognizedSlot(slot.clone()));
        }
    }

    let count = config.loader.files.len();
    if count > MAX_SLOTS {
        errors.push(ValidationError::TooManyFiles {
            count,
            limit: MAX_SLOTS,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&HostConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = HostConfig::default();
        config.logging.level = "loud".into();
        config.loader.files.insert("other.1".into(), "/x".into());
        config.loader.files.insert("file.1".into(), String::new());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLogLevel("loud".into()),
                ValidationError::UnrecognizedSlot("other.1".into()),
            ]
        );
    }

    #[test]
    fn test_too_many_files() {
        let mut config = HostConfig::default();
        for i in 0..=MAX_SLOTS {
            config.loader.files.insert(format!("file.{i}"), "/p".into());
        }

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TooManyFiles { count: 100, limit: 99 }]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = HostConfig::default();
        config.logging.level = "WARN".into();
        assert!(validate_config(&config).is_ok());
    }
}
