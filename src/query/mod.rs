//! # Spatial Query Composer
//!
//! Translates client intent (viewport + performance hints) into one
//! immutable, store-executable query plan. Pure and stateless: the plan is
//! a function of the request parameters alone.

mod errors;
mod params;
mod plan;

pub use errors::{QueryError, QueryResult};
pub use params::ParcelQuery;
pub use plan::{BoundingBox, GeometryExpr, ParcelPlan};
