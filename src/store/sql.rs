//! # SQL Rendering
//!
//! Renders an immutable query plan into one PostGIS statement plus its
//! ordered bind list. Pure string composition; execution lives in the
//! Postgres store.
//!
//! Rendering fixes the spatial-index contract: the client box and the
//! ranking anchor are each reprojected once into the native CRS, so the
//! filter and the distance both run against the indexed native geometry
//! column — never the other way around.

use crate::config::CrsConfig;
use crate::query::{GeometryExpr, ParcelPlan};

use super::layer::LayerDef;

/// A bind parameter in statement order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bind {
    Float(f64),
    Int(i64),
}

/// A rendered statement and its binds
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub text: String,
    pub binds: Vec<Bind>,
}

impl SqlQuery {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            binds: Vec::new(),
        }
    }

    /// Appends a bind and returns its placeholder (`$1`, `$2`, ...)
    fn bind(&mut self, value: Bind) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }
}

/// Renders the parcel query plan.
///
/// Column order matches [`super::ParcelRow`]. The geometry expression
/// simplifies in the native CRS before reprojecting, so the tolerance
/// keeps its metric unit; distance ordering ties are broken by `gid` for a
/// stable row order.
pub fn parcel_select(plan: &ParcelPlan, crs: &CrsConfig) -> SqlQuery {
    let mut query = SqlQuery::new(
        "SELECT gid, idu, numero, section, feuille, code_dep, nom_com, contenance, ",
    );

    let geometry = match plan.geometry {
        GeometryExpr::Simplified { tolerance } => {
            let tol = query.bind(Bind::Float(tolerance));
            format!(
                "ST_AsGeoJSON(ST_Transform(ST_SimplifyPreserveTopology(geom, {}), {})) AS geometry",
                tol, crs.display_srid
            )
        }
        GeometryExpr::Direct => format!(
            "ST_AsGeoJSON(ST_Transform(geom, {})) AS geometry",
            crs.display_srid
        ),
    };
    query.text.push_str(&geometry);
    query.text.push_str(" FROM parcelle");

    if let Some(bbox) = plan.bbox {
        let xmin = query.bind(Bind::Float(bbox.xmin));
        let ymin = query.bind(Bind::Float(bbox.ymin));
        let xmax = query.bind(Bind::Float(bbox.xmax));
        let ymax = query.bind(Bind::Float(bbox.ymax));
        query.text.push_str(&format!(
            " WHERE ST_Intersects(geom, ST_Transform(ST_MakeEnvelope({}, {}, {}, {}, {}), {}))",
            xmin, ymin, xmax, ymax, crs.display_srid, crs.source_srid
        ));
    }

    if let Some((cx, cy)) = plan.anchor() {
        let ax = query.bind(Bind::Float(cx));
        let ay = query.bind(Bind::Float(cy));
        query.text.push_str(&format!(
            " ORDER BY ST_Distance(ST_Centroid(geom), ST_Transform(ST_SetSRID(ST_MakePoint({}, {}), {}), {})), gid",
            ax, ay, crs.display_srid, crs.source_srid
        ));
    }

    if let Some(limit) = plan.limit {
        let cap = query.bind(Bind::Int(i64::from(limit)));
        query.text.push_str(&format!(" LIMIT {}", cap));
    }

    query
}

/// Renders the read-all select for a passthrough layer
pub fn layer_select(layer: &LayerDef, crs: &CrsConfig) -> SqlQuery {
    let properties = layer
        .properties
        .iter()
        .map(|column| format!("'{}', {}", column, column))
        .collect::<Vec<_>>()
        .join(", ");

    SqlQuery::new(format!(
        "SELECT id, ST_AsGeoJSON(ST_Transform(geom, {})) AS geometry, jsonb_build_object({}) AS properties FROM {} ORDER BY id",
        crs.display_srid, properties, layer.table
    ))
}

/// Renders the CRS catalog select
pub fn spatial_ref_sys_select() -> SqlQuery {
    SqlQuery::new(
        "SELECT srid, auth_name, auth_srid, srtext, proj4text FROM spatial_ref_sys ORDER BY srid",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ParcelQuery;

    fn crs() -> CrsConfig {
        CrsConfig::default()
    }

    fn plan(query: ParcelQuery) -> ParcelPlan {
        ParcelPlan::build(&query)
    }

    #[test]
    fn test_bare_select() {
        let rendered = parcel_select(&plan(ParcelQuery::default()), &crs());
        assert_eq!(
            rendered.text,
            "SELECT gid, idu, numero, section, feuille, code_dep, nom_com, contenance, \
             ST_AsGeoJSON(ST_Transform(geom, 4326)) AS geometry FROM parcelle"
        );
        assert!(rendered.binds.is_empty());
    }

    #[test]
    fn test_full_select() {
        let rendered = parcel_select(
            &plan(ParcelQuery {
                limit: Some(10),
                xmin: Some(3.5),
                ymin: Some(49.85),
                xmax: Some(3.7),
                ymax: Some(49.95),
                simplify: Some(5.0),
            }),
            &crs(),
        );

        assert_eq!(
            rendered.text,
            "SELECT gid, idu, numero, section, feuille, code_dep, nom_com, contenance, \
             ST_AsGeoJSON(ST_Transform(ST_SimplifyPreserveTopology(geom, $1), 4326)) AS geometry \
             FROM parcelle \
             WHERE ST_Intersects(geom, ST_Transform(ST_MakeEnvelope($2, $3, $4, $5, 4326), 2154)) \
             ORDER BY ST_Distance(ST_Centroid(geom), ST_Transform(ST_SetSRID(ST_MakePoint($6, $7), 4326), 2154)), gid \
             LIMIT $8"
        );
        assert_eq!(
            rendered.binds,
            vec![
                Bind::Float(5.0),
                Bind::Float(3.5),
                Bind::Float(49.85),
                Bind::Float(3.7),
                Bind::Float(49.95),
                Bind::Float((3.5 + 3.7) / 2.0),
                Bind::Float((49.85 + 49.95) / 2.0),
                Bind::Int(10),
            ]
        );
    }

    #[test]
    fn test_simplify_disabled_renders_direct_transform() {
        for simplify in [None, Some(0.0), Some(-4.0)] {
            let rendered = parcel_select(
                &plan(ParcelQuery {
                    simplify,
                    ..Default::default()
                }),
                &crs(),
            );
            assert!(!rendered.text.contains("ST_SimplifyPreserveTopology"));
            assert!(rendered.binds.is_empty());
        }
    }

    #[test]
    fn test_placeholders_number_consecutively_without_simplify() {
        // With simplification off, the box takes $1..$4 and the anchor
        // $5..$6.
        let rendered = parcel_select(
            &plan(ParcelQuery {
                xmin: Some(0.0),
                ymin: Some(0.0),
                xmax: Some(1.0),
                ymax: Some(1.0),
                ..Default::default()
            }),
            &crs(),
        );
        assert!(rendered.text.contains("ST_MakeEnvelope($1, $2, $3, $4, 4326)"));
        assert!(rendered.text.contains("ST_MakePoint($5, $6)"));
        assert_eq!(rendered.binds.len(), 6);
    }

    #[test]
    fn test_limit_without_bbox_has_no_ordering() {
        let rendered = parcel_select(
            &plan(ParcelQuery {
                limit: Some(100),
                ..Default::default()
            }),
            &crs(),
        );
        assert!(!rendered.text.contains("ORDER BY"));
        assert!(rendered.text.ends_with("LIMIT $1"));
        assert_eq!(rendered.binds, vec![Bind::Int(100)]);
    }

    #[test]
    fn test_layer_select_commune() {
        let layer = LayerDef::find("commune").unwrap();
        let rendered = layer_select(layer, &crs());
        assert_eq!(
            rendered.text,
            "SELECT id, ST_AsGeoJSON(ST_Transform(geom, 4326)) AS geometry, \
             jsonb_build_object('nom_commune', nom_commune, 'code_departement', code_departement, \
             'code_insee', code_insee) AS properties FROM commune ORDER BY id"
        );
        assert!(rendered.binds.is_empty());
    }

    #[test]
    fn test_layer_select_without_properties() {
        let layer = LayerDef::find("feuille").unwrap();
        let rendered = layer_select(layer, &crs());
        assert!(rendered.text.contains("jsonb_build_object() AS properties"));
    }

    #[test]
    fn test_spatial_ref_sys_select() {
        let rendered = spatial_ref_sys_select();
        assert!(rendered.text.starts_with("SELECT srid"));
        assert!(rendered.text.ends_with("ORDER BY srid"));
    }
}
