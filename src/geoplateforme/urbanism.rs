//! Planning documents and constraints from the Géoportail de l'Urbanisme,
//! through the API Carto GPU module.

use anyhow::Result;
use futures::future::try_join_all;
use serde_json::json;

use super::wfs::{resolve_features, FeatureCollection};
use super::GeoplateformeClient;
use crate::models::{Feature, Location};

const SOURCE: &str = "Géoportail de l'Urbanisme (API Carto)";

/// GPU layers queried for a location
pub const GPU_LAYERS: &[&str] = &[
    "zone-urba",
    "secteur-cc",
    "prescription-surf",
    "prescription-lin",
    "prescription-pct",
    "info-surf",
    "info-lin",
    "info-pct",
];

fn geom_param(location: Location) -> String {
    json!({"type": "Point", "coordinates": [location.lon, location.lat]}).to_string()
}

impl GeoplateformeClient {
    /// Urbanism zones, prescriptions and informations at a location
    pub async fn urbanism(&self, location: Location) -> Result<Vec<Feature>> {
        let geom = geom_param(location);
        let urls = GPU_LAYERS
            .iter()
            .map(|layer| {
                self.endpoints
                    .apicarto(&format!("api/gpu/{}", layer), &[("geom", geom.clone())])
            })
            .collect::<Result<Vec<_>>>()?;

        let collections: Vec<FeatureCollection> =
            try_join_all(urls.into_iter().map(|url| self.get_json(url))).await?;

        let merged = FeatureCollection {
            features: collections
                .into_iter()
                .flat_map(|collection| collection.features)
                .collect(),
        };

        Ok(resolve_features(merged, location, SOURCE, self.selection)?)
    }
}
