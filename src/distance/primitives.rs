//! Point-to-primitive distances.

use geo::{Coord, Distance, Haversine, Intersects, LineString, Point, Polygon};

/// Great-circle distance in kilometres
pub fn point_to_point(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b) / 1000.0
}

/// Distance from a point to a segment.
///
/// The closest point is found by projecting in raw lon/lat space, clamped to
/// the segment, and measured with [`point_to_point`].
pub fn point_to_segment(point: Point<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let v = end - start;
    let w = point.0 - start;

    let c1 = dot(w, v);
    if c1 <= 0.0 {
        return point_to_point(point, start.into());
    }
    let c2 = dot(v, v);
    if c2 <= c1 {
        return point_to_point(point, end.into());
    }

    let projected = start + v * (c1 / c2);
    point_to_point(point, projected.into())
}

/// Minimum distance to any segment of the line.
///
/// A single coordinate is measured as a point; an empty line is infinitely far.
pub fn point_to_line_string(point: Point<f64>, line: &LineString<f64>) -> f64 {
    if let [only] = line.0.as_slice() {
        return point_to_point(point, (*only).into());
    }
    line.lines()
        .map(|segment| point_to_segment(point, segment.start, segment.end))
        .fold(f64::INFINITY, f64::min)
}

/// Zero when the point lies inside or on the polygon, otherwise the distance
/// to the nearest ring (holes included).
pub fn point_to_polygon(point: Point<f64>, polygon: &Polygon<f64>) -> f64 {
    if polygon.intersects(&point) {
        return 0.0;
    }
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| point_to_line_string(point, ring))
        .fold(f64::INFINITY, f64::min)
}

fn dot(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x * b.x + a.y * b.y
}
