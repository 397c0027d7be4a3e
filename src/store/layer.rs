//! # Passthrough Layer Registry
//!
//! The cadastral layers served one-to-one as GeoJSON, with no filtering or
//! ordering policy beyond reprojection and a deterministic row order.
//! One static registry drives both route dispatch and SQL generation.

/// A table served as a read-all FeatureCollection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDef {
    /// URL path segment
    pub path: &'static str,
    /// Table name
    pub table: &'static str,
    /// Attribute columns emitted as feature properties
    pub properties: &'static [&'static str],
}

/// Every passthrough layer of the Parcellaire Express schema
pub const LAYERS: &[LayerDef] = &[
    LayerDef {
        path: "batiments",
        table: "batiments",
        properties: &["type_batiment"],
    },
    LayerDef {
        path: "commune",
        table: "commune",
        properties: &["nom_commune", "code_departement", "code_insee"],
    },
    LayerDef {
        path: "feuille",
        table: "feuille",
        properties: &[],
    },
    LayerDef {
        path: "subdivision_fiscale",
        table: "subdivision_fiscale",
        properties: &["lettre", "idu_parcelle"],
    },
    LayerDef {
        path: "localisant",
        table: "localisant",
        properties: &[
            "idu",
            "numero",
            "feuille",
            "section",
            "code_departement",
            "nom_commune",
            "code_commune",
            "commune_abs",
            "code_arret",
        ],
    },
    LayerDef {
        path: "borne_limite_propriete",
        table: "borne_limite_propriete",
        properties: &["id_propriete"],
    },
    LayerDef {
        path: "emprise",
        table: "emprise",
        properties: &["fid"],
    },
];

impl LayerDef {
    /// Looks a layer up by its URL path segment
    pub fn find(path: &str) -> Option<&'static LayerDef> {
        LAYERS.iter().find(|l| l.path == path)
    }
}
