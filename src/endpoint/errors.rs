//! # Endpoint Errors

use thiserror::Error;

use crate::protocol::ProtocolError;
use crate::store::StoreError;

/// Result type for endpoint code
pub type EndpointResult<T> = Result<T, EndpointError>;

/// Errors endpoint code can return
///
/// Only `Protocol` is caught by the dispatcher and turned into a response.
/// The others propagate to the router, which answers 500.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Client-facing error with its own status
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Raw store error, either untranslatable or explicitly requested
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    /// Stored or submitted JSON failed to decode
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EndpointError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            EndpointError::Protocol(err) => err.status_code(),
            EndpointError::Store(_) | EndpointError::Json(_) => 500,
        }
    }

    /// Whether the dispatcher renders this error itself
    pub fn is_protocol(&self) -> bool {
        matches!(self, EndpointError::Protocol(_))
    }

    /// The raw store error, if that is what this is
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            EndpointError::Store(err) => Some(err),
            _ => None,
        }
    }
}
