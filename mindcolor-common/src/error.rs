//! Error types for the Mind Color Map workspace.

use thiserror::Error;

/// Result type alias using the workspace error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the ambient layer (config, I/O, serialization).
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure of the external analysis service
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is recoverable within the session.
    ///
    /// Oracle and input errors always leave a path back to the intake
    /// phase; config and internal errors do not.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Oracle(_) | Self::InvalidInput(_))
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
