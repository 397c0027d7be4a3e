//! # In-Memory Store
//!
//! Evaluates query plans over `geo` geometries, no database required.
//! Used by the test suites and by `serve --memory`.
//!
//! The in-memory plane is a single CRS: native and display coordinates
//! coincide, distances are euclidean, and simplification is plain
//! Douglas-Peucker. The observable contract (bbox gating, nearest-first
//! ordering, post-ordering truncation, tolerance gating) matches what the
//! rendered SQL asks of PostGIS.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use geo::{Centroid, Coord, EuclideanDistance, Intersects, MultiPolygon, Point, Rect, Simplify};

use crate::query::{BoundingBox, GeometryExpr, ParcelPlan};

use super::errors::StoreResult;
use super::layer::LayerDef;
use super::rows::{LayerRow, ParcelRow, SpatialRefSysRow};
use super::CadastreStore;

/// A parcel held in memory
#[derive(Debug, Clone)]
pub struct MemoryParcel {
    pub gid: i32,
    pub idu: Option<String>,
    pub numero: Option<String>,
    pub section: Option<String>,
    pub feuille: Option<i32>,
    pub code_dep: Option<String>,
    pub nom_com: Option<String>,
    pub contenance: Option<i32>,
    pub geom: MultiPolygon<f64>,
}

impl MemoryParcel {
    /// A parcel with the given identifier and geometry, attributes unset
    pub fn new(gid: i32, geom: MultiPolygon<f64>) -> Self {
        Self {
            gid,
            idu: None,
            numero: None,
            section: None,
            feuille: None,
            code_dep: None,
            nom_com: None,
            contenance: None,
            geom,
        }
    }

    fn to_row(&self, expr: &GeometryExpr) -> StoreResult<ParcelRow> {
        let geom = match *expr {
            GeometryExpr::Simplified { tolerance } => self.geom.simplify(&tolerance),
            GeometryExpr::Direct => self.geom.clone(),
        };
        let geometry = geojson::Geometry::new(geojson::Value::from(&geom));
        Ok(ParcelRow {
            gid: self.gid,
            idu: self.idu.clone(),
            numero: self.numero.clone(),
            section: self.section.clone(),
            feuille: self.feuille,
            code_dep: self.code_dep.clone(),
            nom_com: self.nom_com.clone(),
            contenance: self.contenance,
            geometry: serde_json::to_string(&geometry)?,
        })
    }
}

/// In-memory cadastre store
#[derive(Debug, Default)]
pub struct MemoryCadastreStore {
    parcels: Vec<MemoryParcel>,
    layers: HashMap<String, Vec<LayerRow>>,
    spatial_ref_sys: Vec<SpatialRefSysRow>,
}

impl MemoryCadastreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with parcels
    pub fn with_parcels(parcels: Vec<MemoryParcel>) -> Self {
        Self {
            parcels,
            ..Self::default()
        }
    }

    /// Adds a record to a passthrough layer table
    pub fn insert_layer_row(&mut self, table: &str, row: LayerRow) {
        self.layers.entry(table.to_string()).or_default().push(row);
    }

    /// Adds a CRS catalog row
    pub fn insert_spatial_ref_sys(&mut self, row: SpatialRefSysRow) {
        self.spatial_ref_sys.push(row);
    }

    fn bbox_filter(&self, bbox: &BoundingBox) -> Vec<&MemoryParcel> {
        // Rect normalizes its corners, so an inverted client box becomes
        // the equivalent ordered rectangle here (store-defined behavior).
        let rect = Rect::new(
            Coord {
                x: bbox.xmin,
                y: bbox.ymin,
            },
            Coord {
                x: bbox.xmax,
                y: bbox.ymax,
            },
        )
        .to_polygon();
        self.parcels
            .iter()
            .filter(|p| rect.intersects(&p.geom))
            .collect()
    }
}

fn centroid_distance(geom: &MultiPolygon<f64>, anchor: &Point<f64>) -> f64 {
    geom.centroid()
        .map(|c| c.euclidean_distance(anchor))
        .unwrap_or(f64::INFINITY)
}

#[async_trait]
impl CadastreStore for MemoryCadastreStore {
    async fn query_parcels(&self, plan: &ParcelPlan) -> StoreResult<Vec<ParcelRow>> {
        let mut matched: Vec<&MemoryParcel> = match plan.bbox {
            Some(ref bbox) => self.bbox_filter(bbox),
            None => self.parcels.iter().collect(),
        };

        if let Some((ax, ay)) = plan.anchor() {
            let anchor = Point::new(ax, ay);
            let mut ranked: Vec<(f64, &MemoryParcel)> = matched
                .into_iter()
                .map(|p| (centroid_distance(&p.geom, &anchor), p))
                .collect();
            ranked.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.gid.cmp(&b.1.gid))
            });
            matched = ranked.into_iter().map(|(_, p)| p).collect();
        }

        if let Some(limit) = plan.limit {
            matched.truncate(limit as usize);
        }

        matched.iter().map(|p| p.to_row(&plan.geometry)).collect()
    }

    async fn list_layer(&self, layer: &LayerDef) -> StoreResult<Vec<LayerRow>> {
        let mut rows = self.layers.get(layer.table).cloned().unwrap_or_default();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn list_spatial_ref_sys(&self) -> StoreResult<Vec<SpatialRefSysRow>> {
        let mut rows = self.spatial_ref_sys.clone();
        rows.sort_by_key(|r| r.srid);
        Ok(rows)
    }
}
