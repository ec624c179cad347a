//! Error types and result types for document store operations.
//!
//! Every fallible operation in the workspace returns [`StoreResult<T>`]. Errors
//! raised by a backend travel unchanged through the collection, repository and
//! service layers, so callers can match on the variant to decide how to answer.

use bson::error::Error as BsonError;
use std::time::Duration;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or the connection string is invalid.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A point lookup matched no document.
    /// The first field is the requested id, the second the collection name.
    #[error("Document {id} not found in collection {collection}")]
    NotFound {
        id: String,
        collection: String,
    },
    /// An insert was rejected (constraint violation, lost connectivity, partial write).
    #[error("Write error: {0}")]
    Write(String),
    /// Caller supplied parameters that can never produce a valid query.
    #[error("Validation error: {0}")]
    Validation(String),
    /// A find operation failed for any other reason.
    #[error("Query error: {0}")]
    Query(String),
    /// Converting between an entity and its BSON representation failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A store call did not complete before the execution context deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Returns `true` when this error reports a point lookup that matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
