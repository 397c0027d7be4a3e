//! # Geometry Store
//!
//! Boundary to the spatial database. The store executes immutable query
//! plans and returns rows; all geometry math (reprojection, simplification,
//! intersection, distance) happens on the store's side of this seam.
//!
//! Two implementations: [`PgCadastreStore`] composes PostGIS SQL over a
//! pooled connection, [`MemoryCadastreStore`] evaluates the same plan
//! in-process for tests and database-free runs.

mod errors;
mod layer;
mod memory;
mod postgres;
mod rows;
pub mod sql;

use async_trait::async_trait;

use crate::query::ParcelPlan;

pub use errors::{StoreError, StoreResult};
pub use layer::{LayerDef, LAYERS};
pub use memory::{MemoryCadastreStore, MemoryParcel};
pub use postgres::PgCadastreStore;
pub use rows::{LayerRow, ParcelRow, SpatialRefSysRow};

/// Read-only access to the cadastral tables
#[async_trait]
pub trait CadastreStore: Send + Sync {
    /// Executes a parcel query plan, returning rows in plan order
    async fn query_parcels(&self, plan: &ParcelPlan) -> StoreResult<Vec<ParcelRow>>;

    /// Reads every record of a passthrough layer, ordered by identifier
    async fn list_layer(&self, layer: &LayerDef) -> StoreResult<Vec<LayerRow>>;

    /// Reads the coordinate reference system catalog
    async fn list_spatial_ref_sys(&self) -> StoreResult<Vec<SpatialRefSysRow>>;
}
