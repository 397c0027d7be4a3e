//! # Parcel Query Plan
//!
//! The immutable plan the store executes. Built once from validated
//! parameters, then handed over unchanged; no mutable intermediate query
//! state. Same parameters → same plan.
//!
//! The plan fixes three policy points:
//! - geometry expression: simplify in the native CRS (metric tolerance)
//!   and reproject the result, or reproject directly when simplification
//!   is disabled;
//! - bounding box: all four fields or nothing — a partial box never
//!   filters;
//! - ordering: with a box, ascending distance from each parcel's
//!   native-CRS centroid to the box center, so a cap keeps the parcels
//!   nearest the viewport center.

use super::params::ParcelQuery;

/// Axis-aligned rectangle in the display CRS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Center point, the ranking anchor for distance ordering
    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }
}

/// Geometry column expression selected for the response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryExpr {
    /// Reproject the stored geometry to the display CRS as-is
    Direct,
    /// Simplify in the native CRS first (topology preserved), then
    /// reproject the simplified result
    Simplified {
        /// Maximum deviation in native CRS meters; always > 0
        tolerance: f64,
    },
}

impl GeometryExpr {
    fn from_tolerance(simplify: Option<f64>) -> Self {
        match simplify {
            Some(tolerance) if tolerance > 0.0 => GeometryExpr::Simplified { tolerance },
            _ => GeometryExpr::Direct,
        }
    }
}

/// Immutable parcel query plan
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelPlan {
    /// Geometry expression for the selected column
    pub geometry: GeometryExpr,
    /// Spatial filter, present only when the client supplied a full box
    pub bbox: Option<BoundingBox>,
    /// Result cap, applied after distance ordering
    pub limit: Option<u32>,
}

impl ParcelPlan {
    /// Derives the plan from validated parameters.
    ///
    /// The bounding box is one combined gate: any missing field disables
    /// the filter entirely, so no partial or degenerate box is ever
    /// constructed. An inverted box passes through; its interpretation is
    /// store-defined.
    pub fn build(query: &ParcelQuery) -> Self {
        let bbox = match (query.xmin, query.ymin, query.xmax, query.ymax) {
            (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) => Some(BoundingBox {
                xmin,
                ymin,
                xmax,
                ymax,
            }),
            _ => None,
        };

        Self {
            geometry: GeometryExpr::from_tolerance(query.simplify),
            bbox,
            limit: query.limit,
        }
    }

    /// Ranking anchor in the display CRS, present exactly when a box is
    pub fn anchor(&self) -> Option<(f64, f64)> {
        self.bbox.map(|b| b.center())
    }
}
