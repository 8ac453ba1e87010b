use thiserror::Error;

/// Main error type for squidex-dsl operations
#[derive(Error, Debug)]
pub enum DslError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for squidex-dsl operations
pub type Result<T> = std::result::Result<T, DslError>;

impl DslError {
    /// Check if this error was caused by caller-supplied input
    /// (a malformed query document or configuration) rather than by encoding or I/O
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DslError::InvalidQuery(_) | DslError::InvalidConfig(_))
    }
}
