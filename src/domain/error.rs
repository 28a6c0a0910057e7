use std::io;

use thiserror::Error;

/// Library-wide error type for helmgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure outside a chart write (reading input, binding a socket).
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The request payload is not a well-formed JSON object.
    #[error("Failed to decode configuration payload: {0}")]
    Decode(String),

    /// A resource sub-tree does not have the container shape the walk requires.
    #[error("Resource '{resource}' must be a JSON object, found {found}")]
    TypeMismatch { resource: String, found: &'static str },

    /// A tree could not be rendered to YAML text.
    #[error("Failed to serialize {what}: {details}")]
    Serialization { what: String, details: String },

    /// A rendered file could not be written to the output sink.
    #[error("Failed to write '{destination}': {source}")]
    Write {
        destination: String,
        #[source]
        source: io::Error,
    },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Generation was aborted through a cancellation flag.
    #[error("Chart generation was cancelled")]
    Cancelled,

    /// Failure in the surrounding runtime (worker panics, poisoned state).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Io(_) => "io",
            AppError::Decode(_) => "decode",
            AppError::TypeMismatch { .. } => "type_mismatch",
            AppError::Serialization { .. } => "serialization",
            AppError::Write { .. } => "write",
            AppError::Configuration(_) => "configuration",
            AppError::Cancelled => "cancelled",
            AppError::Internal(_) => "internal",
        }
    }

    /// Whether the failure was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Decode(_) | AppError::TypeMismatch { .. })
    }
}
