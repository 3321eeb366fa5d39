//! Protocol error
//!
//! The one error type the dispatcher catches. It carries the status code
//! and the message rendered into `{"error": [message]}`.

use std::fmt;

/// Protocol-level error raised by endpoint code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    status: u16,
    message: String,
}

impl ProtocolError {
    /// Create an error with an arbitrary status
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message)
    }

    /// Returns the HTTP status code
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// Result type for protocol-level operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
