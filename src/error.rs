//! Errors raised by the distance engine and the feature selector.

use thiserror::Error;

/// Data-contract violations detected by the core.
///
/// None of these are recoverable inside the library; the HTTP layer decides
/// how they are reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The distance source was not a `Point`
    #[error("distance source must be a Point (got {found})")]
    InvalidSourceGeometry { found: String },

    /// The target geometry is not one of the six supported GeoJSON shapes
    #[error("geometry type not supported ({0})")]
    UnsupportedGeometryType(String),

    /// A candidate reached the selector without a computed distance
    #[error("feature {id} has no computed distance")]
    MissingDistance { id: String },

    /// A feature identifier does not follow the `<type>.<id>` format
    #[error("malformed feature identifier {0:?}, expected \"<type>.<id>\"")]
    MalformedIdentifier(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
