//! Geocontext - geographic context (administrative units, cadastral parcels,
//! altitude, urbanism) for a coordinate.
//!
//! The library holds the distance engine and the per-category selection used
//! by the `server` binary, along with the upstream service clients.

pub mod distance;
pub mod error;
pub mod geoplateforme;
pub mod models;
pub mod select;

pub use distance::distance;
pub use error::{Error, Result};
pub use models::{Feature, Geometry, Location};
pub use select::{select_nearest_per_category, select_per_category, DistanceOrder, Selection};
