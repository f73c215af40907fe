//! GeoJSON object model.
//!
//! Coordinates are `[longitude, latitude]` in degrees. The synthetic
//! `{"type": "Sphere"}` object stands for the whole globe. Any other
//! unrecognized `type` deserializes to [`GeoJson::Unknown`], which the
//! stream dispatcher skips.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// A position. Extra ordinates such as altitude are accepted and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position(pub f64, pub f64);

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y, ..] => Ok(Position(*x, *y)),
            _ => Err(format!("position needs at least 2 numbers, got {}", v.len())),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.0, p.1]
    }
}

impl From<[f64; 2]> for Position {
    fn from(p: [f64; 2]) -> Self {
        Position(p[0], p[1])
    }
}

pub type Ring = Vec<Position>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Ring>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJson>,
    },
    Feature {
        geometry: Option<Box<GeoJson>>,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        properties: serde_json::Value,
    },
    FeatureCollection {
        features: Vec<GeoJson>,
    },
    Sphere,
    #[serde(other)]
    Unknown,
}

impl GeoJson {
    pub fn point(p: [f64; 2]) -> Self {
        GeoJson::Point {
            coordinates: p.into(),
        }
    }

    pub fn line_string(points: &[[f64; 2]]) -> Self {
        GeoJson::LineString {
            coordinates: points.iter().map(|&p| p.into()).collect(),
        }
    }

    /// A polygon from rings given as coordinate slices. Rings should repeat
    /// their first position at the end, as GeoJSON requires.
    pub fn polygon(rings: &[&[[f64; 2]]]) -> Self {
        GeoJson::Polygon {
            coordinates: rings
                .iter()
                .map(|ring| ring.iter().map(|&p| p.into()).collect())
                .collect(),
        }
    }

    pub fn feature(geometry: GeoJson) -> Self {
        GeoJson::Feature {
            geometry: Some(Box::new(geometry)),
            properties: serde_json::Value::Null,
        }
    }

    /// The GeoJSON `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJson::Point { .. } => "Point",
            GeoJson::MultiPoint { .. } => "MultiPoint",
            GeoJson::LineString { .. } => "LineString",
            GeoJson::MultiLineString { .. } => "MultiLineString",
            GeoJson::Polygon { .. } => "Polygon",
            GeoJson::MultiPolygon { .. } => "MultiPolygon",
            GeoJson::GeometryCollection { .. } => "GeometryCollection",
            GeoJson::Feature { .. } => "Feature",
            GeoJson::FeatureCollection { .. } => "FeatureCollection",
            GeoJson::Sphere => "Sphere",
            GeoJson::Unknown => "Unknown",
        }
    }
}

impl FromStr for GeoJson {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "a"},
                 "geometry": {"type": "Point", "coordinates": [1.5, 2.5, 100.0]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        }"#;
        let obj: GeoJson = json.parse().unwrap();
        let GeoJson::FeatureCollection { features } = obj else {
            panic!("expected a feature collection");
        };
        assert_eq!(features.len(), 2);
        match &features[0] {
            GeoJson::Feature { geometry: Some(g), .. } => {
                assert_eq!(**g, GeoJson::point([1.5, 2.5]));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(features[1], GeoJson::Feature { geometry: None, .. }));
    }

    #[test]
    fn test_sphere_and_unknown() {
        let sphere: GeoJson = r#"{"type": "Sphere"}"#.parse().unwrap();
        assert_eq!(sphere, GeoJson::Sphere);
        let unknown: GeoJson = r#"{"type": "Topology", "arcs": []}"#.parse().unwrap();
        assert_eq!(unknown, GeoJson::Unknown);
    }

    #[test]
    fn test_short_position_rejected() {
        let result = r#"{"type": "Point", "coordinates": [1.0]}"#.parse::<GeoJson>();
        assert!(matches!(result, Err(GeoError::Json(_))));
    }

    #[test]
    fn test_serialize_polygon() {
        let polygon = GeoJson::polygon(&[&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
        let json = serde_json::to_value(&polygon).unwrap();
        assert_eq!(json["type"], "Polygon");
        assert_eq!(json["coordinates"][0][1], serde_json::json!([1.0, 0.0]));
    }
}
