//! # Query Validation Errors
//!
//! Raised before any store interaction; never retried.

use thiserror::Error;

/// Result type for parameter validation
pub type QueryResult<T> = Result<T, QueryError>;

/// Parameter validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// `limit` outside the accepted range
    #[error("limit must be between 1 and {max}, got {got}")]
    LimitOutOfRange { got: u32, max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message() {
        let err = QueryError::LimitOutOfRange {
            got: 0,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "limit must be between 1 and 10000, got 0");
    }
}
