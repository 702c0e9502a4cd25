//! HTTP handlers for the context lookups.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use geocontext::geoplateforme::{Altitude, GeoplateformeClient};
use geocontext::{Feature, Location};

/// Application state shared across handlers
pub struct AppState {
    pub client: GeoplateformeClient,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ParamError>,
}

/// A rejected query parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamError {
    path: &'static str,
    location: &'static str,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// `lon` / `lat` query parameters, kept raw so that every problem is reported
#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    lon: Option<String>,
    lat: Option<String>,
}

impl LocationParams {
    pub fn validate(&self) -> Result<Location, Vec<ParamError>> {
        let lon = parse_coordinate("lon", self.lon.as_deref());
        let lat = parse_coordinate("lat", self.lat.as_deref());

        match (lon, lat) {
            (Ok(lon), Ok(lat)) => Ok(Location::new(lon, lat)),
            (lon, lat) => Err([lon.err(), lat.err()].into_iter().flatten().collect()),
        }
    }
}

fn parse_coordinate(path: &'static str, raw: Option<&str>) -> Result<f64, ParamError> {
    let reject = |msg: &str| ParamError {
        path,
        location: "query",
        msg: msg.to_string(),
        value: raw.map(str::to_string),
    };

    match raw.map(str::trim) {
        None | Some("") => Err(reject("must not be empty")),
        Some(value) => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(reject("must be numeric")),
        },
    }
}

fn invalid_parameters(errors: Vec<ParamError>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: "invalid parameters".to_string(),
            errors,
        }),
    )
}

fn lookup_failed(what: &str, e: anyhow::Error) -> ApiError {
    error!("{} lookup failed: {:#}", what, e);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            message: format!("{} lookup failed: {:#}", what, e),
            errors: Vec::new(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    message: &'static str,
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { message: "OK" })
}

/// Altitude at a location
pub async fn altitude_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Altitude>, ApiError> {
    let location = params.validate().map_err(invalid_parameters)?;
    let altitude = state
        .client
        .altitude(location)
        .await
        .map_err(|e| lookup_failed("altitude", e))?;
    Ok(Json(altitude))
}

/// Administrative units at a location
pub async fn admin_units_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let location = params.validate().map_err(invalid_parameters)?;
    let features = state
        .client
        .admin_units(location)
        .await
        .map_err(|e| lookup_failed("adminexpress", e))?;
    Ok(Json(features))
}

/// Cadastral parcels at a location
pub async fn cadastral_parcels_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let location = params.validate().map_err(invalid_parameters)?;
    let features = state
        .client
        .cadastral_parcels(location)
        .await
        .map_err(|e| lookup_failed("parcellaire-express", e))?;
    Ok(Json(features))
}

/// Urbanism documents and constraints at a location
pub async fn urbanism_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let location = params.validate().map_err(invalid_parameters)?;
    let features = state
        .client
        .urbanism(location)
        .await
        .map_err(|e| lookup_failed("urbanisme", e))?;
    Ok(Json(features))
}
