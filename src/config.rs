//! # Application Configuration
//!
//! Coordinate reference systems and query bounds for the cadastral API.
//!
//! Geometries are stored in the French national projection (Lambert-93,
//! EPSG:2154, metric) and served in the CRS web map clients consume
//! (WGS84, EPSG:4326).

use serde::{Deserialize, Serialize};

/// Coordinate reference system pair used by every spatial query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrsConfig {
    /// SRID geometries are stored in (projected, linear meters)
    #[serde(default = "default_source_srid")]
    pub source_srid: i32,

    /// SRID geometries are served in (geographic, degrees)
    #[serde(default = "default_display_srid")]
    pub display_srid: i32,
}

fn default_source_srid() -> i32 {
    2154
}

fn default_display_srid() -> i32 {
    4326
}

impl Default for CrsConfig {
    fn default() -> Self {
        Self {
            source_srid: default_source_srid(),
            display_srid: default_display_srid(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// CRS pair for storage and display
    #[serde(default)]
    pub crs: CrsConfig,

    /// Hard cap on the `limit` query parameter
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Limit advertised to map clients (never applied server-side;
    /// an absent `limit` means unlimited)
    #[serde(default = "default_client_limit")]
    pub default_limit: u32,
}

fn default_max_limit() -> u32 {
    10_000
}

fn default_client_limit() -> u32 {
    2_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crs: CrsConfig::default(),
            max_limit: default_max_limit(),
            default_limit: default_client_limit(),
        }
    }
}
