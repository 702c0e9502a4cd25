//! Clients for the upstream geodata services.
//!
//! Every feature lookup goes through the same pipeline: fetch a GeoJSON
//! FeatureCollection, measure each feature against the query location and
//! keep one feature per category.

mod altitude;
mod client;
mod urbanism;
mod wfs;

pub use altitude::Altitude;
pub use client::{Endpoints, GeoplateformeClient, DEFAULT_APICARTO_URL, DEFAULT_GPF_URL};
pub use urbanism::GPU_LAYERS;
pub use wfs::{resolve_features, FeatureCollection, RawFeature, WfsLayer, ADMINEXPRESS, PARCELLAIRE_EXPRESS};
