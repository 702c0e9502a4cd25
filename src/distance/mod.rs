//! Distance from a query point to an arbitrary feature geometry.
//!
//! Point-to-point distances are great-circle distances; segments are projected
//! in raw lon/lat space before measuring, so results are only accurate locally.

mod primitives;

use geo::Point;

use crate::error::{Error, Result};
use crate::models::Geometry;

use primitives::{point_to_line_string, point_to_point, point_to_polygon};

/// Minimum distance (kilometres) from `source` to `target`.
///
/// `source` must be a `Point`. A point inside a polygon is at distance 0.
pub fn distance(source: &Geometry, target: &Geometry) -> Result<f64> {
    match source {
        Geometry::Point(point) => point_to_geometry(*point, target),
        other => Err(Error::InvalidSourceGeometry {
            found: other.type_name().to_string(),
        }),
    }
}

fn point_to_geometry(point: Point<f64>, target: &Geometry) -> Result<f64> {
    let d = match target {
        Geometry::Point(other) => point_to_point(point, *other),
        Geometry::LineString(line) => point_to_line_string(point, line),
        Geometry::Polygon(polygon) => point_to_polygon(point, polygon),
        Geometry::MultiPoint(points) => minimum(points.iter().map(|p| point_to_point(point, *p))),
        Geometry::MultiLineString(lines) => {
            minimum(lines.iter().map(|line| point_to_line_string(point, line)))
        }
        Geometry::MultiPolygon(polygons) => {
            minimum(polygons.iter().map(|polygon| point_to_polygon(point, polygon)))
        }
        Geometry::Unsupported(geo_type) => {
            return Err(Error::UnsupportedGeometryType(geo_type.clone()))
        }
    };
    Ok(d)
}

fn minimum(distances: impl Iterator<Item = f64>) -> f64 {
    distances.fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon, Contains, LineString, MultiLineString, MultiPoint, MultiPolygon};

    fn paris() -> Geometry {
        Geometry::Point(Point::new(2.3522, 48.8566))
    }

    fn square(min: f64, max: f64) -> geo::Polygon<f64> {
        polygon![
            (x: min, y: min),
            (x: max, y: min),
            (x: max, y: max),
            (x: min, y: max),
        ]
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(distance(&paris(), &paris()).unwrap(), 0.0);
    }

    #[test]
    fn test_point_matches_primitive() {
        let london = Point::new(-0.1276, 51.5072);
        let d = distance(&paris(), &Geometry::Point(london)).unwrap();
        assert_eq!(d, point_to_point(Point::new(2.3522, 48.8566), london));
        assert!(d > 300.0 && d < 400.0, "got {}", d);
    }

    #[test]
    fn test_line_string_is_reproducible() {
        let line = Geometry::LineString(line_string![(x: 2.0, y: 48.0), (x: 3.0, y: 49.0)]);
        let first = distance(&paris(), &line).unwrap();
        assert!(first.is_finite() && first > 0.0);
        for _ in 0..10 {
            assert_eq!(distance(&paris(), &line).unwrap().to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_point_inside_polygon_is_zero() {
        let polygon = square(2.0, 3.0);
        let point = Point::new(2.5, 2.5);
        assert!(polygon.contains(&point));
        assert_eq!(
            distance(&Geometry::Point(point), &Geometry::Polygon(polygon)).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_point_outside_polygon_uses_rings() {
        let polygon = square(0.0, 1.0);
        let d = distance(&paris(), &Geometry::Polygon(polygon.clone())).unwrap();
        let expected = point_to_line_string(Point::new(2.3522, 48.8566), polygon.exterior());
        assert!(d > 0.0);
        assert_eq!(d, expected);
    }

    #[test]
    fn test_multi_point_is_member_minimum() {
        let members = vec![Point::new(0.0, 0.0), Point::new(2.0, 48.0), Point::new(10.0, 10.0)];
        let expected = members
            .iter()
            .map(|p| distance(&paris(), &Geometry::Point(*p)).unwrap())
            .fold(f64::INFINITY, f64::min);
        let multi = Geometry::MultiPoint(MultiPoint::new(members));
        assert_eq!(distance(&paris(), &multi).unwrap(), expected);
    }

    #[test]
    fn test_multi_line_string_is_member_minimum() {
        let members: Vec<LineString<f64>> = vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 2.0, y: 48.0), (x: 3.0, y: 49.0)],
        ];
        let expected = members
            .iter()
            .map(|l| distance(&paris(), &Geometry::LineString(l.clone())).unwrap())
            .fold(f64::INFINITY, f64::min);
        let multi = Geometry::MultiLineString(MultiLineString::new(members));
        assert_eq!(distance(&paris(), &multi).unwrap(), expected);
    }

    #[test]
    fn test_multi_polygon_is_member_minimum() {
        let far = square(0.0, 1.0);
        let containing = square(2.0, 3.0);
        let multi = Geometry::MultiPolygon(MultiPolygon::new(vec![far.clone(), containing]));
        let inside = Geometry::Point(Point::new(2.5, 2.5));
        assert_eq!(distance(&inside, &multi).unwrap(), 0.0);

        let only_far = Geometry::MultiPolygon(MultiPolygon::new(vec![far.clone()]));
        assert_eq!(
            distance(&paris(), &only_far).unwrap(),
            distance(&paris(), &Geometry::Polygon(far)).unwrap()
        );
    }

    #[test]
    fn test_unsupported_target() {
        let collection = Geometry::Unsupported("GeometryCollection".to_string());
        assert_eq!(
            distance(&paris(), &collection),
            Err(Error::UnsupportedGeometryType("GeometryCollection".to_string()))
        );
    }

    #[test]
    fn test_source_must_be_point() {
        let line = Geometry::LineString(line_string![(x: 2.0, y: 48.0), (x: 3.0, y: 49.0)]);
        assert_eq!(
            distance(&line, &paris()),
            Err(Error::InvalidSourceGeometry {
                found: "LineString".to_string()
            })
        );
    }
}
