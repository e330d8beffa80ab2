//! Filesystem error taxonomy
//!
//! Every adapter operation fails with one of these kinds. Remote client errors
//! are translated at the adapter boundary by [`FsError::from_api`], so callers
//! never see transport-level error types.

use crate::api::ApiError;
use thiserror::Error;

/// Errors returned by filesystem operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// The remote service could not be reached or refused to serve the request
    #[error("Remote service unavailable: {message}")]
    RemoteUnavailable { message: String },

    #[error("Not found: {path}")]
    NotFound { path: String },

    /// The operation collides with an existing resource
    #[error("Conflict at {path}: {message}")]
    Conflict { path: String, message: String },

    /// The backing store has no equivalent of the requested operation
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    /// The remote service answered with something that is not a resource
    #[error("Malformed response: {message}")]
    Malformed { message: String },

    /// Rejected before reaching the adapter
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl FsError {
    /// Translates a remote client error raised while operating on `path`
    pub fn from_api(error: ApiError, path: &str) -> Self {
        match error {
            ApiError::NotFound { .. } => FsError::NotFound {
                path: path.to_string(),
            },
            ApiError::Conflict { message } => FsError::Conflict {
                path: path.to_string(),
                message,
            },
            ApiError::InvalidResponse { message } => FsError::Malformed { message },
            other @ (ApiError::Network { .. }
            | ApiError::Timeout { .. }
            | ApiError::Authentication { .. }
            | ApiError::RateLimit { .. }
            | ApiError::Api { .. }) => FsError::RemoteUnavailable {
                message: other.to_string(),
            },
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        FsError::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FsError::Unsupported { .. })
    }
}
