//! Spherical point-in-geometry tests.

use crate::geojson::{GeoJson, Position};
use crate::math::{EPSILON2, RADIANS};
use crate::measure::distance;
use crate::polygon_contains::polygon_contains;

/// Whether `point` (`[longitude, latitude]` in degrees) lies in `object`.
///
/// Points must coincide exactly, and lines must pass through the point to
/// within a small angular tolerance. Features inside a geometry collection
/// and unknown types contain nothing.
pub fn contains(object: &GeoJson, point: [f64; 2]) -> bool {
    match object {
        GeoJson::Feature { geometry, .. } => geometry
            .as_deref()
            .is_some_and(|g| contains_geometry(g, point)),
        GeoJson::FeatureCollection { features } => features.iter().any(|f| contains(f, point)),
        geometry => contains_geometry(geometry, point),
    }
}

fn contains_geometry(geometry: &GeoJson, point: [f64; 2]) -> bool {
    match geometry {
        GeoJson::Sphere => true,
        GeoJson::Point { coordinates } => contains_point(*coordinates, point),
        GeoJson::MultiPoint { coordinates } => {
            coordinates.iter().any(|&c| contains_point(c, point))
        }
        GeoJson::LineString { coordinates } => contains_line(coordinates, point),
        GeoJson::MultiLineString { coordinates } => {
            coordinates.iter().any(|line| contains_line(line, point))
        }
        GeoJson::Polygon { coordinates } => contains_polygon(coordinates, point),
        GeoJson::MultiPolygon { coordinates } => coordinates
            .iter()
            .any(|polygon| contains_polygon(polygon, point)),
        GeoJson::GeometryCollection { geometries } => {
            geometries.iter().any(|g| contains_geometry(g, point))
        }
        _ => false,
    }
}

fn contains_point(coordinates: Position, point: [f64; 2]) -> bool {
    distance(coordinates.into(), point) == 0.0
}

fn contains_line(coordinates: &[Position], point: [f64; 2]) -> bool {
    let mut previous: Option<([f64; 2], f64)> = None;
    for &c in coordinates {
        let b: [f64; 2] = c.into();
        let bo = distance(b, point);
        if bo == 0.0 {
            return true;
        }
        if let Some((a, ao)) = previous {
            let ab = distance(a, b);
            if ab > 0.0
                && ao <= ab
                && bo <= ab
                && (ao + bo - ab) * (1.0 - ((ao - bo) / ab).powi(2)) < EPSILON2 * ab
            {
                return true;
            }
        }
        previous = Some((b, bo));
    }
    false
}

fn contains_polygon(rings: &[Vec<Position>], point: [f64; 2]) -> bool {
    let rings: Vec<Vec<[f64; 2]>> = rings
        .iter()
        .map(|ring| {
            let n = ring.len().saturating_sub(1);
            ring[..n]
                .iter()
                .map(|p| [p.0 * RADIANS, p.1 * RADIANS])
                .collect()
        })
        .collect();
    polygon_contains(&rings, [point[0] * RADIANS, point[1] * RADIANS])
}
