use std::io;

use crate::resolution::ResolutionHistory;
use crate::uri::Uri;

/// Errors that can occur while resolving or invoking wrappers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid URI \"{uri}\": {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Error resolving URI \"{uri}\"\nURI not found {target}\nResolution Stack:\n{history}")]
    UriNotFound {
        uri: Uri,
        target: Uri,
        history: ResolutionHistory,
    },

    #[error("Infinite loop while resolving URI \"{uri}\"\nResolution Stack:\n{history}")]
    CycleDetected {
        uri: Uri,
        history: ResolutionHistory,
    },

    #[error("Error resolving URI \"{uri}\": {reason}\nResolution Stack:\n{history}")]
    ResolutionFailed {
        uri: Uri,
        reason: Box<Error>,
        history: ResolutionHistory,
    },

    #[error("Resolver panicked: {0}")]
    ResolverPanicked(String),

    #[error("Failed to load resolver extension \"{uri}\": {reason}")]
    ExtensionLoadFailed { uri: Uri, reason: Box<Error> },

    #[error("Failed to create wrapper for \"{uri}\": {message}")]
    PackageInstantiationFailed { uri: Uri, message: String },

    /// Wrapper-internal fault; the message is passed through verbatim.
    #[error("{message}")]
    WrapperInvocationFailed {
        uri: Uri,
        method: String,
        message: String,
    },

    #[error("Encoding error: {0}")]
    EncodingFailed(String),

    #[error("Query parse error: {0}")]
    QueryParseFailed(String),

    #[error("{} invocation(s) failed", .0.len())]
    AggregateQueryErrors(Vec<Error>),

    #[error("File not found at {0}")]
    FileNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Resolution history embedded in the error, if any
    pub fn history(&self) -> Option<&ResolutionHistory> {
        match self {
            Error::UriNotFound { history, .. }
            | Error::CycleDetected { history, .. }
            | Error::ResolutionFailed { history, .. } => Some(history),
            _ => None,
        }
    }

    /// True for errors raised by the resolver chain itself
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::UriNotFound { .. } | Error::CycleDetected { .. } | Error::ResolutionFailed { .. }
        )
    }
}

/// Result type alias for wrapline operations
pub type Result<T> = std::result::Result<T, Error>;
