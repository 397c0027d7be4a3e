//! # Parcel Query Parameters
//!
//! The six optional client parameters of the parcel endpoint, exactly as
//! they arrive on the query string. Validation is separate from parsing so
//! the plan builder only ever sees checked values.

use serde::Deserialize;

use super::errors::{QueryError, QueryResult};

/// Raw query parameters for the parcel endpoint
///
/// All fields are optional. The bounding box only takes effect when all
/// four of `xmin`, `ymin`, `xmax`, `ymax` are present; `simplify` only when
/// strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParcelQuery {
    /// Maximum number of parcels to return (1 ..= max_limit)
    pub limit: Option<u32>,

    /// Bounding box min longitude, display CRS
    pub xmin: Option<f64>,
    /// Bounding box min latitude, display CRS
    pub ymin: Option<f64>,
    /// Bounding box max longitude, display CRS
    pub xmax: Option<f64>,
    /// Bounding box max latitude, display CRS
    pub ymax: Option<f64>,

    /// Simplification tolerance in native CRS meters
    pub simplify: Option<f64>,
}

impl ParcelQuery {
    /// Checks declared parameter constraints.
    ///
    /// Only `limit` carries a range constraint. Degenerate spatial inputs
    /// (partial bbox, non-positive tolerance) are not errors; the plan
    /// builder normalizes them.
    pub fn validate(&self, max_limit: u32) -> QueryResult<()> {
        if let Some(limit) = self.limit {
            if limit < 1 || limit > max_limit {
                return Err(QueryError::LimitOutOfRange {
                    got: limit,
                    max: max_limit,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 10_000;

    #[test]
    fn test_empty_query_is_valid() {
        assert!(ParcelQuery::default().validate(MAX).is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let q = ParcelQuery {
            limit: Some(1),
            ..Default::default()
        };
        assert!(q.validate(MAX).is_ok());

        let q = ParcelQuery {
            limit: Some(MAX),
            ..Default::default()
        };
        assert!(q.validate(MAX).is_ok());
    }

    #[test]
    fn test_limit_zero_rejected() {
        let q = ParcelQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(
            q.validate(MAX),
            Err(QueryError::LimitOutOfRange { got: 0, max: MAX })
        );
    }

    #[test]
    fn test_limit_above_max_rejected() {
        let q = ParcelQuery {
            limit: Some(MAX + 1),
            ..Default::default()
        };
        assert!(q.validate(MAX).is_err());
    }

    #[test]
    fn test_degenerate_spatial_inputs_are_not_errors() {
        // Partial bbox and non-positive tolerance are normalized later,
        // never rejected.
        let q = ParcelQuery {
            xmin: Some(3.5),
            simplify: Some(-2.0),
            ..Default::default()
        };
        assert!(q.validate(MAX).is_ok());
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let q: ParcelQuery =
            serde_urlencoded::from_str("xmin=3.5&ymin=49.85&xmax=3.7&ymax=49.95&limit=10")
                .unwrap();
        assert_eq!(q.limit, Some(10));
        assert_eq!(q.xmin, Some(3.5));
        assert_eq!(q.simplify, None);
    }
}
