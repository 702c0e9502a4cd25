//! WFS lookups (administrative units, cadastral parcels) and the shared
//! decorate-then-select pipeline for feature collections.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use super::GeoplateformeClient;
use crate::distance::distance;
use crate::models::{Feature, Geometry, Location, Properties};
use crate::select::Selection;

/// A set of feature types published under one WFS namespace
pub struct WfsLayer {
    pub namespace: &'static str,
    pub types: &'static [&'static str],
    pub source: &'static str,
}

pub const ADMINEXPRESS: WfsLayer = WfsLayer {
    namespace: "ADMINEXPRESS-COG.LATEST",
    types: &[
        "commune",
        "canton",
        "collectivite_territoriale",
        "epci",
        "departement",
        "region",
        "arrondissement",
    ],
    source: "Géoplateforme (WFS, ADMINEXPRESS-COG.LATEST)",
};

pub const PARCELLAIRE_EXPRESS: WfsLayer = WfsLayer {
    namespace: "CADASTRALPARCELS.PARCELLAIRE_EXPRESS",
    types: &[
        "arrondissement",
        "commune",
        "feuille",
        "parcelle",
        "subdivision_fiscale",
    ],
    source: "Géoplateforme (WFS, CADASTRALPARCELS.PARCELLAIRE_EXPRESS)",
};

impl WfsLayer {
    /// Comma separated `namespace:type` list
    pub fn type_names(&self) -> String {
        self.types
            .iter()
            .map(|t| format!("{}:{}", self.namespace, t))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// GetFeature parameters for the features intersecting a location.
    ///
    /// EPSG:4326 is lat/lon ordered for GeoServer, hence the flipped point.
    pub fn get_feature_params(&self, location: Location) -> Vec<(&'static str, String)> {
        vec![
            ("service", "WFS".to_string()),
            ("request", "GetFeature".to_string()),
            ("typeName", self.type_names()),
            ("outputFormat", "application/json".to_string()),
            (
                "cql_filter",
                format!("INTERSECTS(geom,Point({} {}))", location.lat, location.lon),
            ),
        ]
    }
}

/// GeoJSON FeatureCollection as returned upstream
#[derive(Debug, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Attach the distance to `location` to every feature, then keep one feature
/// per category according to `selection`.
///
/// Features without geometry cannot be measured and are dropped.
pub fn resolve_features(
    collection: FeatureCollection,
    location: Location,
    source: &str,
    selection: Selection,
) -> crate::error::Result<Vec<Feature>> {
    let origin = location.to_geometry();
    let mut candidates = Vec::with_capacity(collection.features.len());

    for raw in collection.features {
        let id = raw.id.unwrap_or_default();
        let Some(geometry) = raw.geometry else {
            warn!("Skipping feature {:?} without geometry", id);
            continue;
        };

        let d = distance(&origin, &geometry)?;
        let feature = Feature::new(id, geometry, source)?
            .with_bbox(raw.bbox)
            .with_properties(raw.properties.unwrap_or_default())
            .with_distance(d);
        candidates.push(feature);
    }

    let count = candidates.len();
    let selected = selection.apply(candidates)?;
    debug!(
        "Resolved {} features from {} into {} categories",
        count,
        source,
        selected.len()
    );

    Ok(selected)
}

impl GeoplateformeClient {
    /// Query a WFS layer for the features intersecting a location
    pub async fn wfs_lookup(&self, layer: &WfsLayer, location: Location) -> Result<Vec<Feature>> {
        let url = self
            .endpoints
            .gpf("wfs", &layer.get_feature_params(location))?;
        let collection: FeatureCollection = self.get_json(url).await?;
        Ok(resolve_features(
            collection,
            location,
            layer.source,
            self.selection,
        )?)
    }

    /// Administrative units (commune, departement, ...) at a location
    pub async fn admin_units(&self, location: Location) -> Result<Vec<Feature>> {
        self.wfs_lookup(&ADMINEXPRESS, location).await
    }

    /// Cadastral units (parcelle, feuille, ...) at a location
    pub async fn cadastral_parcels(&self, location: Location) -> Result<Vec<Feature>> {
        self.wfs_lookup(&PARCELLAIRE_EXPRESS, location).await
    }
}
