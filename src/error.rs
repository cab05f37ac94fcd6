// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResumeError>;

#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed corpus entry '{entry}': {message}")]
    MalformedCorpus { entry: String, message: String },

    #[error("Duplicate entry identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Redaction scan failed: {0}")]
    Redaction(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResumeError {
    /// Load-time failures abort startup; query-time failures are returned to
    /// the caller without terminating the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ResumeError::Config(_)
                | ResumeError::MalformedCorpus { .. }
                | ResumeError::DuplicateIdentifier(_)
        )
    }
}
