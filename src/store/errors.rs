//! # Data Store Errors

use thiserror::Error;

/// Result type for data store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data store errors
///
/// `NotFound` and `AlreadyExists` are the two signals the endpoint layer
/// translates into protocol responses. Everything else is a store failure
/// that propagates untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Path (or one of its parents) does not exist
    #[error("Data not found: /{}", .0.join("/"))]
    NotFound(Vec<String>),

    /// Create collided with an existing name
    #[error("Data already exists: /{}", .0.join("/"))]
    AlreadyExists(Vec<String>),

    /// Non-recursive subtree delete on a subtree that still has children
    #[error("Subtree not empty: /{}", .0.join("/"))]
    NotEmpty(Vec<String>),

    /// Entry operation used on a subtree, or the reverse
    #[error("{} called on wrong node kind: /{}", .operation, .path.join("/"))]
    WrongKind {
        operation: &'static str,
        path: Vec<String>,
    },

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&[String]> {
        match self {
            StoreError::NotFound(p) | StoreError::AlreadyExists(p) | StoreError::NotEmpty(p) => {
                Some(p)
            }
            StoreError::WrongKind { path, .. } => Some(path),
            StoreError::Backend(_) => None,
        }
    }

    /// True for the missing-resource signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// True for the name-collision signal
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists(_))
    }
}
