//! # Feature Assembly
//!
//! Maps store rows into GeoJSON features. Geometry arrives as text (the
//! store's exchange encoding) and is decoded into a structured geometry
//! value here, so the response carries nested geometry objects, never
//! escaped text.

use geojson::{feature::Id, Feature, FeatureCollection, JsonObject};
use serde_json::json;
use thiserror::Error;

use crate::store::{LayerRow, ParcelRow};

/// Result type for feature assembly
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Feature assembly errors: the store handed back something that is not
/// a usable geometry or property payload
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Geometry text did not parse as GeoJSON
    #[error("malformed geometry from store: {0}")]
    Geometry(#[from] geojson::Error),

    /// Layer properties were not a JSON object
    #[error("layer properties must be a JSON object")]
    Properties,
}

/// Builds the feature for one parcel row.
///
/// Property order and names are the endpoint contract: idu, numero,
/// section, feuille, code_dep, nom_com, contenance. Absent attributes are
/// emitted as nulls, not dropped.
pub fn parcel_feature(row: &ParcelRow) -> FeatureResult<Feature> {
    let geometry: geojson::Geometry = row.geometry.parse()?;

    let mut properties = JsonObject::new();
    properties.insert("idu".to_string(), json!(row.idu));
    properties.insert("numero".to_string(), json!(row.numero));
    properties.insert("section".to_string(), json!(row.section));
    properties.insert("feuille".to_string(), json!(row.feuille));
    properties.insert("code_dep".to_string(), json!(row.code_dep));
    properties.insert("nom_com".to_string(), json!(row.nom_com));
    properties.insert("contenance".to_string(), json!(row.contenance));

    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::Number(row.gid.into())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Wraps parcel rows into a feature collection, preserving row order
pub fn parcel_collection(rows: &[ParcelRow]) -> FeatureResult<FeatureCollection> {
    let features = rows
        .iter()
        .map(parcel_feature)
        .collect::<FeatureResult<Vec<_>>>()?;
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Builds the feature for one passthrough layer row
pub fn layer_feature(row: &LayerRow) -> FeatureResult<Feature> {
    let geometry: geojson::Geometry = row.geometry.parse()?;
    let properties = match &row.properties {
        serde_json::Value::Object(map) => map.clone(),
        _ => return Err(FeatureError::Properties),
    };

    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::Number(row.id.into())),
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Wraps layer rows into a feature collection, preserving row order
pub fn layer_collection(rows: &[LayerRow]) -> FeatureResult<FeatureCollection> {
    let features = rows
        .iter()
        .map(layer_feature)
        .collect::<FeatureResult<Vec<_>>>()?;
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLYGON: &str =
        r#"{"type":"Polygon","coordinates":[[[3.5,49.8],[3.6,49.8],[3.6,49.9],[3.5,49.8]]]}"#;

    fn parcel_row() -> ParcelRow {
        ParcelRow {
            gid: 42,
            idu: Some("020010000A0042".to_string()),
            numero: Some("0042".to_string()),
            section: Some("A".to_string()),
            feuille: Some(1),
            code_dep: Some("02".to_string()),
            nom_com: Some("Laon".to_string()),
            contenance: Some(1250),
            geometry: POLYGON.to_string(),
        }
    }

    #[test]
    fn test_parcel_feature_shape() {
        let feature = parcel_feature(&parcel_row()).unwrap();
        assert_eq!(feature.id, Some(Id::Number(42.into())));

        let properties = feature.properties.unwrap();
        assert_eq!(properties["idu"], json!("020010000A0042"));
        assert_eq!(properties["contenance"], json!(1250));
        assert_eq!(properties.len(), 7);

        let geometry = feature.geometry.unwrap();
        assert!(matches!(geometry.value, geojson::Value::Polygon(_)));
    }

    #[test]
    fn test_absent_attributes_become_nulls() {
        let row = ParcelRow {
            idu: None,
            contenance: None,
            ..parcel_row()
        };
        let properties = parcel_feature(&row).unwrap().properties.unwrap();
        assert_eq!(properties["idu"], serde_json::Value::Null);
        assert_eq!(properties["contenance"], serde_json::Value::Null);
    }

    #[test]
    fn test_collection_envelope() {
        let collection = parcel_collection(&[parcel_row()]).unwrap();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["id"], 42);
        assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn test_empty_collection_is_not_an_error() {
        let collection = parcel_collection(&[]).unwrap();
        assert!(collection.features.is_empty());
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }

    #[test]
    fn test_malformed_geometry_is_an_error() {
        let row = ParcelRow {
            geometry: "not geojson".to_string(),
            ..parcel_row()
        };
        assert!(matches!(
            parcel_feature(&row),
            Err(FeatureError::Geometry(_))
        ));
    }

    #[test]
    fn test_layer_feature_carries_store_properties() {
        let row = LayerRow {
            id: 7,
            geometry: POLYGON.to_string(),
            properties: json!({"nom_commune": "Laon", "code_insee": "02408"}),
        };
        let feature = layer_feature(&row).unwrap();
        let properties = feature.properties.unwrap();
        assert_eq!(properties["nom_commune"], json!("Laon"));
        assert_eq!(feature.id, Some(Id::Number(7.into())));
    }

    #[test]
    fn test_layer_feature_rejects_non_object_properties() {
        let row = LayerRow {
            id: 7,
            geometry: POLYGON.to_string(),
            properties: json!([1, 2, 3]),
        };
        assert!(matches!(layer_feature(&row), Err(FeatureError::Properties)));
    }
}
