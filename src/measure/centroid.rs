use crate::adder::Adder;
use crate::cartesian::{cartesian, cross, Vec3};
use crate::geojson::GeoJson;
use crate::math::{asin, DEGREES, EPSILON, EPSILON2, RADIANS};
use crate::stream::{stream, GeoStream};

fn hypot3(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Spherical centroid consumer.
///
/// Accumulates three weighted means of unit vectors at once: vertices, edge
/// midpoints weighted by arc length, and ring areas. The result uses the
/// area mean if any area accumulated, else the length mean, else the
/// vertex mean.
#[derive(Debug, Default)]
pub struct GeoCentroid {
    // Vertex mean.
    w0: f64,
    v0: Vec3,
    // Length-weighted edge midpoints.
    w1: f64,
    v1: Vec3,
    // Area-weighted normals.
    x2: Adder,
    y2: Adder,
    z2: Adder,
    in_polygon: bool,
    in_line: bool,
    first: Option<[f64; 2]>,
    previous: Option<Vec3>,
}

impl GeoCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_vertex(&mut self, v: Vec3) {
        self.w0 += 1.0;
        for (mean, x) in self.v0.iter_mut().zip(v) {
            *mean += (x - *mean) / self.w0;
        }
    }

    fn add_edge(&mut self, v0: Vec3, v: Vec3, w: f64) {
        self.w1 += w;
        for i in 0..3 {
            self.v1[i] += w * (v0[i] + v[i]);
        }
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        let v = cartesian([lambda * RADIANS, phi * RADIANS]);
        match self.previous {
            None => self.first = Some([lambda, phi]),
            Some(v0) if self.in_polygon => {
                let c = cross(v0, v);
                let m = hypot3(c);
                let w = asin(m);
                let k = if m == 0.0 { 0.0 } else { -w / m };
                self.x2.add(k * c[0]);
                self.y2.add(k * c[1]);
                self.z2.add(k * c[2]);
                self.add_edge(v0, v, w);
            }
            Some(v0) => {
                let w = hypot3(cross(v0, v)).atan2(v0[0] * v[0] + v0[1] * v[1] + v0[2] * v[2]);
                self.add_edge(v0, v, w);
            }
        }
        self.previous = Some(v);
        self.add_vertex(v);
    }

    /// `[longitude, latitude]` in degrees, or NaN when nothing non-degenerate
    /// was streamed.
    pub fn result(&self) -> [f64; 2] {
        let mut v = [self.x2.value(), self.y2.value(), self.z2.value()];
        let mut m = hypot3(v);
        if m < EPSILON2 {
            v = if self.w1 < EPSILON { self.v0 } else { self.v1 };
            m = hypot3(v);
            if m < EPSILON2 {
                return [f64::NAN, f64::NAN];
            }
        }
        [v[1].atan2(v[0]) * DEGREES, asin(v[2] / m) * DEGREES]
    }
}

impl GeoStream for GeoCentroid {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_line {
            self.line_point(x, y);
        } else {
            self.add_vertex(cartesian([x * RADIANS, y * RADIANS]));
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

/// Spherical centroid of `object` in degrees.
pub fn centroid(object: &GeoJson) -> [f64; 2] {
    let mut sink = GeoCentroid::new();
    stream(object, &mut sink);
    sink.result()
}
