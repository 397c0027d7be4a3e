//! # Parcel Routes
//!
//! The spatial-query endpoint. Validation happens before the store is
//! touched; the immutable plan is the only thing that crosses into the
//! store.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use geojson::FeatureCollection;
use tracing::debug;

use crate::features;
use crate::query::{ParcelPlan, ParcelQuery};

use super::errors::ApiResult;
use super::server::AppState;

/// Parcel endpoint routes
pub fn parcel_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/parcelle", get(list_parcels_handler))
        .route("/parcelle/", get(list_parcels_handler))
        .with_state(state)
}

/// GET /parcelle/ — parcels as a FeatureCollection.
///
/// Optional parameters: `limit` (1..=max), `xmin`/`ymin`/`xmax`/`ymax`
/// (display CRS, all four or the filter is off), `simplify` (native CRS
/// meters, ≤ 0 disables).
async fn list_parcels_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParcelQuery>,
) -> ApiResult<Json<FeatureCollection>> {
    params.validate(state.config.max_limit)?;

    let plan = ParcelPlan::build(&params);
    debug!(?plan, "executing parcel query");

    let rows = state.store.query_parcels(&plan).await?;
    let collection = features::parcel_collection(&rows)?;
    Ok(Json(collection))
}
