//! Features returned by the upstream services, decorated with a distance.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use super::Geometry;
use crate::error::{Error, Result};

/// Value of an upstream property.
///
/// Numbers keep their integer or float representation. Arrays and objects are
/// kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Nested(Value),
}

/// Upstream properties, passed through untouched
pub type Properties = BTreeMap<String, PropertyValue>;

/// A feature of a geodata service (commune, parcelle, zone_urba, ...).
///
/// Serialized as `{type, id, bbox, source, distance, properties}`. The
/// geometry is only kept to compute the distance and is never returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    /// Category parsed from the identifier (ex: "commune")
    #[serde(rename = "type")]
    pub category: String,

    /// Upstream identifier (ex: "commune.3837")
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,

    /// Human readable name of the upstream service
    pub source: String,

    /// Distance to the query location, in kilometres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    pub properties: Properties,

    #[serde(skip)]
    pub geometry: Geometry,
}

impl Feature {
    /// Build a feature from its identifier, deriving the category
    pub fn new(
        id: impl Into<String>,
        geometry: Geometry,
        source: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let category = parse_category(&id)?.to_string();
        Ok(Self {
            category,
            id,
            bbox: None,
            source: source.into(),
            distance: None,
            properties: Properties::new(),
            geometry,
        })
    }

    pub fn with_bbox(mut self, bbox: Option<Vec<f64>>) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Category of a feature identifier: the part before the first `.`
/// (`"commune.3837"` -> `"commune"`).
pub fn parse_category(id: &str) -> Result<&str> {
    match id.split_once('.') {
        Some((category, _)) if !category.is_empty() => Ok(category),
        _ => Err(Error::MalformedIdentifier(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;
    use serde_json::json;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("commune.3837").unwrap(), "commune");
        assert_eq!(parse_category("zone_urba.12.4").unwrap(), "zone_urba");
    }

    #[test]
    fn test_parse_category_malformed() {
        for id in ["", "commune", ".3837"] {
            assert_eq!(
                parse_category(id),
                Err(Error::MalformedIdentifier(id.to_string()))
            );
        }
    }

    #[test]
    fn test_feature_serialization_hides_geometry() {
        let mut properties = Properties::new();
        properties.insert("nom".into(), PropertyValue::String("Paris".into()));
        properties.insert("population".into(), PropertyValue::Number(Number::from(2133111u32)));
        properties.insert("chef_lieu".into(), PropertyValue::Bool(true));
        properties.insert("code_siren".into(), PropertyValue::Null);

        let feature = Feature::new("commune.3837", Geometry::Point(Point::new(2.3, 48.8)), "test")
            .unwrap()
            .with_properties(properties)
            .with_distance(0.0);

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "commune",
                "id": "commune.3837",
                "source": "test",
                "distance": 0.0,
                "properties": {
                    "chef_lieu": true,
                    "code_siren": null,
                    "nom": "Paris",
                    "population": 2133111
                }
            })
        );
    }

    #[test]
    fn test_property_value_decoding() {
        let properties: Properties =
            serde_json::from_value(json!({"a": 1, "b": "x", "c": false, "d": null})).unwrap();
        assert_eq!(properties["a"], PropertyValue::Number(Number::from(1u8)));
        assert_eq!(properties["b"], PropertyValue::String("x".into()));
        assert_eq!(properties["c"], PropertyValue::Bool(false));
        assert_eq!(properties["d"], PropertyValue::Null);
    }

    #[test]
    fn test_numbers_keep_their_representation() {
        let properties: Properties = serde_json::from_value(json!({
            "population": 2133111,
            "big": 9007199254740993u64,
            "surface": 105.4
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({"big": 9007199254740993u64, "population": 2133111, "surface": 105.4})
        );
        assert_eq!(
            serde_json::to_string(&properties["big"]).unwrap(),
            "9007199254740993"
        );
    }

    #[test]
    fn test_nested_values_are_kept() {
        let properties: Properties = serde_json::from_value(json!({
            "tags": ["a", "b"],
            "meta": {"version": 2}
        }))
        .unwrap();
        assert_eq!(properties["tags"], PropertyValue::Nested(json!(["a", "b"])));
        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({"meta": {"version": 2}, "tags": ["a", "b"]})
        );
    }
}
