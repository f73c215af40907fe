//! The geometry stream protocol.
//!
//! Clippers, the resampler, measurements and renderers are all
//! [`GeoStream`] sinks. [`stream`] walks a GeoJSON object once and drives a
//! sink with a fixed bracketing order:
//!
//! * bare points arrive as standalone `point` calls;
//! * lines arrive as `line_start`, `point`*, `line_end`;
//! * polygons wrap their rings in `polygon_start` / `polygon_end`, and each
//!   ring is a line whose closing coordinate is omitted (sinks close rings
//!   themselves);
//! * the `Sphere` object arrives as a single `sphere` call.

use crate::geojson::{GeoJson, Position};

pub trait GeoStream {
    fn point(&mut self, x: f64, y: f64);

    /// A point where a clipped line meets the clip boundary.
    fn crossing(&mut self, x: f64, y: f64) {
        self.point(x, y);
    }

    fn line_start(&mut self) {}

    fn line_end(&mut self) {}

    fn polygon_start(&mut self) {}

    fn polygon_end(&mut self) {}

    fn sphere(&mut self) {}
}

impl<S: GeoStream + ?Sized> GeoStream for &mut S {
    fn point(&mut self, x: f64, y: f64) {
        (**self).point(x, y);
    }

    fn crossing(&mut self, x: f64, y: f64) {
        (**self).crossing(x, y);
    }

    fn line_start(&mut self) {
        (**self).line_start();
    }

    fn line_end(&mut self) {
        (**self).line_end();
    }

    fn polygon_start(&mut self) {
        (**self).polygon_start();
    }

    fn polygon_end(&mut self) {
        (**self).polygon_end();
    }

    fn sphere(&mut self) {
        (**self).sphere();
    }
}

/// Stream `object` into `sink` in a single depth-first traversal.
pub fn stream<S: GeoStream + ?Sized>(object: &GeoJson, sink: &mut S) {
    match object {
        GeoJson::Feature { geometry, .. } => {
            if let Some(geometry) = geometry {
                stream_geometry(geometry, sink);
            }
        }
        GeoJson::FeatureCollection { features } => {
            for feature in features {
                match feature {
                    GeoJson::Feature {
                        geometry: Some(geometry),
                        ..
                    } => stream_geometry(geometry, sink),
                    GeoJson::Feature { geometry: None, .. } => {}
                    other => skip(other),
                }
            }
        }
        geometry => stream_geometry(geometry, sink),
    }
}

fn stream_geometry<S: GeoStream + ?Sized>(geometry: &GeoJson, sink: &mut S) {
    match geometry {
        GeoJson::Sphere => sink.sphere(),
        GeoJson::Point { coordinates } => sink.point(coordinates.0, coordinates.1),
        GeoJson::MultiPoint { coordinates } => {
            for p in coordinates {
                sink.point(p.0, p.1);
            }
        }
        GeoJson::LineString { coordinates } => stream_line(coordinates, sink, false),
        GeoJson::MultiLineString { coordinates } => {
            for line in coordinates {
                stream_line(line, sink, false);
            }
        }
        GeoJson::Polygon { coordinates } => stream_polygon(coordinates, sink),
        GeoJson::MultiPolygon { coordinates } => {
            for polygon in coordinates {
                stream_polygon(polygon, sink);
            }
        }
        GeoJson::GeometryCollection { geometries } => {
            for geometry in geometries {
                stream_geometry(geometry, sink);
            }
        }
        other => skip(other),
    }
}

fn skip(object: &GeoJson) {
    tracing::debug!(kind = object.type_name(), "skipping object with no geometry to stream");
}

fn stream_line<S: GeoStream + ?Sized>(coordinates: &[Position], sink: &mut S, closed: bool) {
    let n = if closed {
        coordinates.len().saturating_sub(1)
    } else {
        coordinates.len()
    };
    sink.line_start();
    for p in &coordinates[..n] {
        sink.point(p.0, p.1);
    }
    sink.line_end();
}

fn stream_polygon<S: GeoStream + ?Sized>(rings: &[Vec<Position>], sink: &mut S) {
    sink.polygon_start();
    for ring in rings {
        stream_line(ring, sink, true);
    }
    sink.polygon_end();
}

/// A sink that records every call; used by tests across the crate.
#[cfg(test)]
pub(crate) mod recorder {
    use super::GeoStream;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Event {
        Point(f64, f64),
        LineStart,
        LineEnd,
        PolygonStart,
        PolygonEnd,
        Sphere,
    }

    #[derive(Debug, Default)]
    pub struct Recorder {
        pub events: Vec<Event>,
    }

    impl Recorder {
        pub fn points(&self) -> Vec<[f64; 2]> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Point(x, y) => Some([*x, *y]),
                    _ => None,
                })
                .collect()
        }

        /// Point lists of every emitted line, in order.
        pub fn lines(&self) -> Vec<Vec<[f64; 2]>> {
            let mut lines = Vec::new();
            for e in &self.events {
                match e {
                    Event::LineStart => lines.push(Vec::new()),
                    Event::Point(x, y) => {
                        if let Some(line) = lines.last_mut() {
                            line.push([*x, *y]);
                        }
                    }
                    _ => {}
                }
            }
            lines
        }

        pub fn count(&self, event: &Event) -> usize {
            self.events.iter().filter(|e| *e == event).count()
        }
    }

    impl GeoStream for Recorder {
        fn point(&mut self, x: f64, y: f64) {
            self.events.push(Event::Point(x, y));
        }

        fn line_start(&mut self) {
            self.events.push(Event::LineStart);
        }

        fn line_end(&mut self) {
            self.events.push(Event::LineEnd);
        }

        fn polygon_start(&mut self) {
            self.events.push(Event::PolygonStart);
        }

        fn polygon_end(&mut self) {
            self.events.push(Event::PolygonEnd);
        }

        fn sphere(&mut self) {
            self.events.push(Event::Sphere);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recorder::{Event, Recorder};
    use super::*;

    #[test]
    fn test_polygon_rings_drop_closing_point() {
        let polygon = GeoJson::polygon(&[&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
        let mut rec = Recorder::default();
        stream(&polygon, &mut rec);
        assert_eq!(
            rec.events,
            vec![
                Event::PolygonStart,
                Event::LineStart,
                Event::Point(0.0, 0.0),
                Event::Point(1.0, 0.0),
                Event::Point(1.0, 1.0),
                Event::LineEnd,
                Event::PolygonEnd,
            ]
        );
    }

    #[test]
    fn test_line_keeps_all_points() {
        let line = GeoJson::line_string(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        let mut rec = Recorder::default();
        stream(&line, &mut rec);
        assert_eq!(rec.points().len(), 3);
        assert_eq!(rec.count(&Event::LineStart), 1);
    }

    #[test]
    fn test_features_and_collections() {
        let fc = GeoJson::FeatureCollection {
            features: vec![
                GeoJson::feature(GeoJson::point([1.0, 2.0])),
                GeoJson::Feature {
                    geometry: None,
                    properties: serde_json::Value::Null,
                },
                GeoJson::feature(GeoJson::GeometryCollection {
                    geometries: vec![GeoJson::Sphere, GeoJson::point([3.0, 4.0])],
                }),
            ],
        };
        let mut rec = Recorder::default();
        stream(&fc, &mut rec);
        assert_eq!(
            rec.events,
            vec![Event::Point(1.0, 2.0), Event::Sphere, Event::Point(3.0, 4.0)]
        );
    }

    #[test]
    fn test_unknown_is_skipped() {
        let mut rec = Recorder::default();
        stream(&GeoJson::Unknown, &mut rec);
        let nested = GeoJson::GeometryCollection {
            geometries: vec![GeoJson::Unknown, GeoJson::feature(GeoJson::point([0.0, 0.0]))],
        };
        stream(&nested, &mut rec);
        assert!(rec.events.is_empty());
    }
}
