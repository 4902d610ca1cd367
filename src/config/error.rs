//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Institution name cannot be blank")]
    BlankInstitutionName,

    #[error("Signatory title cannot be blank")]
    BlankSignatoryTitle,

    #[error("PDF timeout must be between 1 and 300 seconds")]
    InvalidPdfTimeout,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
