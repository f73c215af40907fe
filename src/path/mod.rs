//! Planar rendering and measurement of projected geometry.
//!
//! [`GeoPath`] pairs an optional [`Projection`] with the planar consumers in
//! this module. Without a projection, coordinates pass through unchanged,
//! which suits geometry that is already planar.

pub mod area;
pub mod bounds;
pub mod centroid;
pub mod context;
pub mod measure;
pub mod string;

pub use area::PathArea;
pub use bounds::PathBounds;
pub use centroid::PathCentroid;
pub use context::{ContextStream, PathContext, DEFAULT_POINT_RADIUS};
pub use measure::PathMeasure;
pub use string::PathString;

use crate::geojson::GeoJson;
use crate::proj::Projection;
use crate::stream::{stream, GeoStream};

#[derive(Clone, Debug)]
pub struct GeoPath {
    projection: Option<Projection>,
    point_radius: f64,
    digits: Option<u32>,
}

impl Default for GeoPath {
    fn default() -> Self {
        Self {
            projection: None,
            point_radius: DEFAULT_POINT_RADIUS,
            digits: None,
        }
    }
}

impl GeoPath {
    pub fn new(projection: Option<Projection>) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    /// Round SVG output to `digits` decimal places.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Stream `object` through the projection, if any, into `sink`.
    pub fn stream_into<S: GeoStream>(&self, object: &GeoJson, sink: &mut S) {
        match &self.projection {
            Some(projection) => stream(object, &mut projection.stream(sink)),
            None => stream(object, sink),
        }
    }

    /// SVG path data for `object`; empty when nothing is visible.
    pub fn svg(&self, object: &GeoJson) -> String {
        let mut sink = PathString::new().with_point_radius(self.point_radius);
        if let Some(digits) = self.digits {
            sink = sink.with_digits(digits);
        }
        self.stream_into(object, &mut sink);
        sink.finish()
    }

    /// Draw `object` onto `context`.
    pub fn render<C: PathContext>(&self, object: &GeoJson, context: &mut C) {
        let mut sink = ContextStream::new(context).with_point_radius(self.point_radius);
        self.stream_into(object, &mut sink);
    }

    /// Projected area in square output units.
    pub fn area(&self, object: &GeoJson) -> f64 {
        let mut sink = PathArea::new();
        self.stream_into(object, &mut sink);
        sink.result()
    }

    pub fn bounds(&self, object: &GeoJson) -> [[f64; 2]; 2] {
        let mut sink = PathBounds::new();
        self.stream_into(object, &mut sink);
        sink.result()
    }

    pub fn centroid(&self, object: &GeoJson) -> [f64; 2] {
        let mut sink = PathCentroid::new();
        self.stream_into(object, &mut sink);
        sink.result()
    }

    /// Projected length of lines and polygon perimeters.
    pub fn measure(&self, object: &GeoJson) -> f64 {
        let mut sink = PathMeasure::new();
        self.stream_into(object, &mut sink);
        sink.result()
    }
}
