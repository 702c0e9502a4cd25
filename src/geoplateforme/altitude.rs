//! Altitude lookup through the Géoplateforme altimetry service.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::GeoplateformeClient;
use crate::models::Location;

const ELEVATION_PATH: &str = "altimetrie/1.0/calcul/alti/rest/elevation.json";
const ELEVATION_RESOURCE: &str = "ign_rge_alti_wld";
const SOURCE: &str = "Géoplateforme (altimetrie)";

/// Altitude at a location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Altitude {
    pub lon: f64,
    pub lat: f64,
    /// Metres, `None` when the service has no elevation for the location
    pub altitude: Option<f64>,
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    elevations: Vec<Elevation>,
}

#[derive(Debug, Deserialize)]
struct Elevation {
    z: f64,
}

impl ElevationResponse {
    fn into_altitude(self, location: Location) -> Altitude {
        Altitude {
            lon: location.lon,
            lat: location.lat,
            altitude: self.elevations.first().map(|e| e.z),
            source: SOURCE,
        }
    }
}

impl GeoplateformeClient {
    /// Altitude at a location
    pub async fn altitude(&self, location: Location) -> Result<Altitude> {
        let url = self.endpoints.gpf(
            ELEVATION_PATH,
            &[
                ("lon", location.lon.to_string()),
                ("lat", location.lat.to_string()),
                ("resource", ELEVATION_RESOURCE.to_string()),
            ],
        )?;
        let response: ElevationResponse = self.get_json(url).await?;
        Ok(response.into_altitude(location))
    }
}
