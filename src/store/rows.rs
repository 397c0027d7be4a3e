//! # Store Row Types
//!
//! The selected columns of each query, one struct per shape. Geometry
//! travels as GeoJSON text (what `ST_AsGeoJSON` emits, always in the
//! display CRS) and is decoded into a structured value during feature
//! assembly.

use serde::Serialize;
use sqlx::FromRow;

/// One cadastral parcel with its fixed attribute set
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ParcelRow {
    /// Stable parcel identifier
    pub gid: i32,
    /// National parcel identifier (idu)
    pub idu: Option<String>,
    /// Parcel number within the section
    pub numero: Option<String>,
    /// Cadastral section code
    pub section: Option<String>,
    /// Sheet number
    pub feuille: Option<i32>,
    /// Department code
    pub code_dep: Option<String>,
    /// Commune name
    pub nom_com: Option<String>,
    /// Declared area in square meters
    pub contenance: Option<i32>,
    /// GeoJSON geometry text, display CRS
    pub geometry: String,
}

/// One record of a passthrough layer
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct LayerRow {
    pub id: i32,
    /// GeoJSON geometry text, display CRS
    pub geometry: String,
    /// Flat attribute mapping, already JSON on the store side
    pub properties: serde_json::Value,
}

/// One row of the coordinate reference system catalog
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SpatialRefSysRow {
    pub srid: i32,
    pub auth_name: Option<String>,
    pub auth_srid: Option<i32>,
    pub srtext: Option<String>,
    pub proj4text: Option<String>,
}
