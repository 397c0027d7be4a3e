//! # Store Errors
//!
//! Failures crossing the geometry-store boundary. Never retried here;
//! surfaced to the HTTP layer as service errors.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Geometry store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query execution or connection failure
    #[error("geometry store query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A geometry could not be encoded to its exchange format
    #[error("geometry encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
