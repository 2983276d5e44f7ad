//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the reserved diagnostics prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("diagnostics.prefix {0:?} must start and end with '/'")]
    PrefixNotDelimited(String),

    #[error("diagnostics.prefix must not be the root path")]
    PrefixIsRoot,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    let prefix = &config.diagnostics.prefix;
    if prefix == "/" {
        errors.push(ValidationError::PrefixIsRoot);
    } else if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::PrefixNotDelimited(prefix.clone()));
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
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.host = " ".into();
        config.diagnostics.prefix = "debug".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyHost,
                ValidationError::PrefixNotDelimited("debug".into()),
            ]
        );
    }

    #[test]
    fn test_root_prefix_rejected() {
        let mut config = RelayConfig::default();
        config.diagnostics.prefix = "/".into();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::PrefixIsRoot]
        );
    }
}
