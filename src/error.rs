//! Error handling for the candidate ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),
}

impl RankerError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RankerError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RankerError>;

/// Convert TOML serialization errors to our custom error type
impl From<toml::ser::Error> for RankerError {
    fn from(err: toml::ser::Error) -> Self {
        RankerError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
