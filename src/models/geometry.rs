//! GeoJSON geometries as returned by the upstream feature services.

use geo_types::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// Query location (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// The location as a distance source
    pub fn to_geometry(self) -> Geometry {
        Geometry::Point(Point::new(self.lon, self.lat))
    }
}

/// Geometry of an upstream feature.
///
/// Coordinates are `[longitude, latitude]` pairs, taken as given. Any GeoJSON
/// `type` other than the six simple shapes decodes to `Unsupported` so that the
/// distance engine can report it instead of failing the whole collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub enum Geometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
    MultiPoint(MultiPoint<f64>),
    MultiLineString(MultiLineString<f64>),
    MultiPolygon(MultiPolygon<f64>),
    /// Any other GeoJSON type, carrying its `type` tag
    Unsupported(String),
}

impl Geometry {
    /// GeoJSON type name
    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::Unsupported(kind) => kind,
        }
    }
}

/// GeoJSON position: at least two numbers, extra ordinates are dropped
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "Vec<f64>")]
struct Position(Coord<f64>);

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y, ..] => Ok(Position(Coord { x: *x, y: *y })),
            _ => Err(format!(
                "position needs at least 2 coordinates, got {}",
                values.len()
            )),
        }
    }
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    geo_type: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = serde_json::Error;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        let coordinates = raw.coordinates;
        let geometry = match raw.geo_type.as_str() {
            "Point" => {
                let Position(coord) = serde_json::from_value(coordinates)?;
                Geometry::Point(coord.into())
            }
            "LineString" => Geometry::LineString(line_string(serde_json::from_value(coordinates)?)),
            "Polygon" => Geometry::Polygon(polygon(serde_json::from_value(coordinates)?)),
            "MultiPoint" => {
                let positions: Vec<Position> = serde_json::from_value(coordinates)?;
                Geometry::MultiPoint(positions.into_iter().map(|p| Point::from(p.0)).collect())
            }
            "MultiLineString" => {
                let lines: Vec<Vec<Position>> = serde_json::from_value(coordinates)?;
                Geometry::MultiLineString(MultiLineString::new(
                    lines.into_iter().map(line_string).collect(),
                ))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Position>>> = serde_json::from_value(coordinates)?;
                Geometry::MultiPolygon(MultiPolygon::new(
                    polygons.into_iter().map(polygon).collect(),
                ))
            }
            _ => Geometry::Unsupported(raw.geo_type),
        };
        Ok(geometry)
    }
}

fn line_string(positions: Vec<Position>) -> LineString<f64> {
    LineString::new(positions.into_iter().map(|p| p.0).collect())
}

/// First ring is the exterior, the others are holes
fn polygon(rings: Vec<Vec<Position>>) -> Polygon<f64> {
    let mut rings = rings.into_iter().map(line_string);
    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Polygon::new(exterior, rings.collect())
}
