//! cadastre - French cadastral data (Parcellaire Express) served from
//! PostGIS as GeoJSON

pub mod cli;
pub mod config;
pub mod features;
pub mod http;
pub mod query;
pub mod store;
