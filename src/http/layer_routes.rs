//! # Passthrough Layer Routes
//!
//! Uniform read-all endpoints, one generic handler dispatched through the
//! layer registry, plus the CRS catalog.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use geojson::FeatureCollection;

use crate::features;
use crate::store::{LayerDef, SpatialRefSysRow};

use super::errors::{ApiError, ApiResult};
use super::server::AppState;

/// Passthrough layer routes
pub fn layer_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/spatial_ref_sys", get(spatial_ref_sys_handler))
        .route("/spatial_ref_sys/", get(spatial_ref_sys_handler))
        .route("/{layer}", get(list_layer_handler))
        .route("/{layer}/", get(list_layer_handler))
        .with_state(state)
}

/// GET /<layer>/ — every record of a registered layer as a
/// FeatureCollection
async fn list_layer_handler(
    State(state): State<Arc<AppState>>,
    Path(layer): Path<String>,
) -> ApiResult<Json<FeatureCollection>> {
    let def = LayerDef::find(&layer).ok_or(ApiError::UnknownLayer(layer))?;
    let rows = state.store.list_layer(def).await?;
    let collection = features::layer_collection(&rows)?;
    Ok(Json(collection))
}

/// GET /spatial_ref_sys/ — the CRS catalog as plain rows (no geometry)
async fn spatial_ref_sys_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpatialRefSysRow>>> {
    Ok(Json(state.store.list_spatial_ref_sys().await?))
}
