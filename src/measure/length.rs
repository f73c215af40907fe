use crate::adder::Adder;
use crate::geojson::GeoJson;
use crate::math::RADIANS;
use crate::stream::{stream, GeoStream};

#[derive(Clone, Copy, Debug)]
struct Vertex {
    lambda: f64,
    sin_phi: f64,
    cos_phi: f64,
}

/// Great-arc length consumer. Polygon rings include their closing edge.
#[derive(Debug, Default)]
pub struct GeoLength {
    sum: Adder,
    in_polygon: bool,
    in_line: bool,
    first: Option<[f64; 2]>,
    previous: Option<Vertex>,
}

impl GeoLength {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total length in radians.
    pub fn result(&self) -> f64 {
        self.sum.value()
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        let l = lambda * RADIANS;
        let (sin_phi, cos_phi) = (phi * RADIANS).sin_cos();
        if let Some(p) = self.previous {
            let delta = (l - p.lambda).abs();
            let (sin_delta, cos_delta) = delta.sin_cos();
            let x = cos_phi * sin_delta;
            let y = p.cos_phi * sin_phi - p.sin_phi * cos_phi * cos_delta;
            let z = p.sin_phi * sin_phi + p.cos_phi * cos_phi * cos_delta;
            self.sum.add((x * x + y * y).sqrt().atan2(z));
        } else {
            self.first = Some([lambda, phi]);
        }
        self.previous = Some(Vertex {
            lambda: l,
            sin_phi,
            cos_phi,
        });
    }
}

impl GeoStream for GeoLength {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_line {
            self.line_point(x, y);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        self.previous = None;
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            if let Some([lambda, phi]) = self.first {
                self.line_point(lambda, phi);
            }
        }
        self.in_line = false;
        self.first = None;
        self.previous = None;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}

/// Total great-arc length of `object` in radians. Points contribute nothing.
pub fn length(object: &GeoJson) -> f64 {
    let mut sink = GeoLength::new();
    stream(object, &mut sink);
    sink.result()
}

/// Great-arc distance between two `[longitude, latitude]` points, in radians.
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let mut sink = GeoLength::new();
    sink.line_start();
    sink.point(a[0], a[1]);
    sink.point(b[0], b[1]);
    sink.line_end();
    sink.result()
}
