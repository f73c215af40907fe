//! Small circles on the sphere.
//!
//! [`circle_stream`] walks a circle of a given angular radius centred on
//! (0°, 0°); the circle clipper uses it to interpolate along its boundary and
//! [`GeoCircle`] rotates it to an arbitrary centre to build polygons.

use crate::cartesian::{cartesian, normalize, spherical};
use crate::geojson::{GeoJson, Position};
use crate::math::{acos, DEGREES, EPSILON, RADIANS, TAU};
use crate::rotation::Rotation;
use crate::stream::GeoStream;

/// Emit points along the circle of `radius` (radians) around (0, 0), stepping
/// by `delta` in `direction` (+1 or -1).
///
/// With `span = None` the full circle is emitted. Otherwise only the arc
/// between the two points of `span`, both of which lie on the circle.
pub fn circle_stream<S: GeoStream + ?Sized>(
    sink: &mut S,
    radius: f64,
    delta: f64,
    direction: f64,
    span: Option<([f64; 2], [f64; 2])>,
) {
    if delta == 0.0 {
        return;
    }
    let cos_radius = radius.cos();
    let sin_radius = radius.sin();
    let step = direction * delta;
    let (mut t0, t1) = match span {
        None => (radius + direction * TAU, radius - step / 2.0),
        Some((from, to)) => (circle_radius(cos_radius, from), circle_radius(cos_radius, to)),
    };
    if span.is_some() && (if direction > 0.0 { t0 < t1 } else { t0 > t1 }) {
        t0 += direction * TAU;
    }

    let mut t = t0;
    while if direction > 0.0 { t > t1 } else { t < t1 } {
        let p = spherical([cos_radius, -sin_radius * t.cos(), -sin_radius * t.sin()]);
        sink.point(p[0], p[1]);
        t -= step;
    }
}

/// Signed angle of `point` around the circle relative to `[cos_radius, 0, 0]`.
fn circle_radius(cos_radius: f64, point: [f64; 2]) -> f64 {
    let mut v = cartesian(point);
    v[0] -= cos_radius;
    let v = normalize(v);
    let radius = acos(-v[1]);
    ((if -v[2] < 0.0 { -radius } else { radius }) + TAU - EPSILON) % TAU
}

/// Generator for circle polygons, all parameters in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCircle {
    pub center: [f64; 2],
    pub radius: f64,
    pub precision: f64,
}

impl Default for GeoCircle {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            radius: 90.0,
            precision: 2.0,
        }
    }
}

struct RingCollector {
    rotation: Rotation,
    ring: Vec<Position>,
}

impl GeoStream for RingCollector {
    fn point(&mut self, x: f64, y: f64) {
        let [lambda, phi] = self.rotation.invert(x, y);
        self.ring.push(Position(lambda * DEGREES, phi * DEGREES));
    }
}

impl GeoCircle {
    pub fn new(center: [f64; 2], radius: f64) -> Self {
        Self {
            center,
            radius,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// The circle as a closed single-ring polygon.
    pub fn polygon(&self) -> GeoJson {
        let mut collector = RingCollector {
            rotation: Rotation::new(-self.center[0] * RADIANS, -self.center[1] * RADIANS, 0.0),
            ring: Vec::new(),
        };
        circle_stream(
            &mut collector,
            self.radius * RADIANS,
            self.precision * RADIANS,
            1.0,
            None,
        );
        GeoJson::Polygon {
            coordinates: vec![collector.ring],
        }
    }
}
