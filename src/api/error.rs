//! Remote API error types
//!
//! `ApiError` describes what went wrong talking to the resource API. It never
//! leaves the crate's public filesystem surface: the adapter translates it
//! into [`FsError`](crate::fs::FsError) at the boundary.

use thiserror::Error;

/// Errors that can occur during resource API calls
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Connection could not be established or was interrupted
    #[error("Network error: {message}")]
    Network { message: String },

    /// Request timed out after the specified duration (in seconds)
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Credentials were rejected
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    #[error("Rate limit exceeded{}", retry_suffix(.retry_after))]
    RateLimit { retry_after: Option<u64> },

    /// The addressed resource does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// The request collides with an existing resource
    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    /// Any other non-success status
    #[error("API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    /// Maps an HTTP status and error body onto an error kind.
    ///
    /// Cloudinary reports name collisions on rename as a plain 400 whose
    /// message says the resource already exists, so the body is inspected too.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => ApiError::Authentication { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { message },
            420 | 429 => ApiError::RateLimit { retry_after: None },
            _ if message.to_lowercase().contains("already exists") => {
                ApiError::Conflict { message }
            }
            _ => ApiError::Api {
                status_code,
                message,
            },
        }
    }
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(", retry after {} seconds", seconds),
        None => String::new(),
    }
}
