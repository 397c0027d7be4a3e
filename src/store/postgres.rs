//! # Postgres Store
//!
//! Executes rendered statements against PostGIS over a sqlx pool. The
//! pool is the only shared resource; every query borrows a connection for
//! its own round trip and releases it unconditionally.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::CrsConfig;
use crate::query::ParcelPlan;

use super::errors::StoreResult;
use super::layer::LayerDef;
use super::rows::{LayerRow, ParcelRow, SpatialRefSysRow};
use super::sql::{self, Bind, SqlQuery};
use super::CadastreStore;

/// PostGIS-backed cadastre store
pub struct PgCadastreStore {
    pool: PgPool,
    crs: CrsConfig,
}

impl PgCadastreStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool, crs: CrsConfig) -> Self {
        Self { pool, crs }
    }

    /// Connects a fresh pool to the given database
    pub async fn connect(database_url: &str, crs: CrsConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        info!(source_srid = crs.source_srid, "connected to geometry store");
        Ok(Self::new(pool, crs))
    }

    async fn fetch<R>(&self, query: &SqlQuery) -> StoreResult<Vec<R>>
    where
        R: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let mut prepared = sqlx::query_as::<_, R>(&query.text);
        for bind in &query.binds {
            prepared = match *bind {
                Bind::Float(value) => prepared.bind(value),
                Bind::Int(value) => prepared.bind(value),
            };
        }
        Ok(prepared.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl CadastreStore for PgCadastreStore {
    async fn query_parcels(&self, plan: &ParcelPlan) -> StoreResult<Vec<ParcelRow>> {
        self.fetch(&sql::parcel_select(plan, &self.crs)).await
    }

    async fn list_layer(&self, layer: &LayerDef) -> StoreResult<Vec<LayerRow>> {
        self.fetch(&sql::layer_select(layer, &self.crs)).await
    }

    async fn list_spatial_ref_sys(&self) -> StoreResult<Vec<SpatialRefSysRow>> {
        self.fetch(&sql::spatial_ref_sys_select()).await
    }
}
