//! Great-arc interpolation between two points.

use crate::math::{asin, haversin, DEGREES, RADIANS};

/// Interpolates along the great arc from `a` to `b`; see [`interpolate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoInterpolator {
    start: [f64; 2],
    k0: [f64; 3],
    k1: [f64; 3],
    distance: f64,
    sin_distance: f64,
}

/// A great-arc interpolator from `a` to `b` (`[longitude, latitude]` in
/// degrees).
pub fn interpolate(a: [f64; 2], b: [f64; 2]) -> GeoInterpolator {
    let (x0, y0) = (a[0] * RADIANS, a[1] * RADIANS);
    let (x1, y1) = (b[0] * RADIANS, b[1] * RADIANS);
    let (cy0, sy0) = (y0.cos(), y0.sin());
    let (cy1, sy1) = (y1.cos(), y1.sin());
    let distance = 2.0 * asin((haversin(y1 - y0) + cy0 * cy1 * haversin(x1 - x0)).sqrt());
    GeoInterpolator {
        start: a,
        k0: [cy0 * x0.cos(), cy0 * x0.sin(), sy0],
        k1: [cy1 * x1.cos(), cy1 * x1.sin(), sy1],
        distance,
        sin_distance: distance.sin(),
    }
}

impl GeoInterpolator {
    /// Angular distance between the endpoints, in radians.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The point a fraction `t` of the way along the arc. Coincident
    /// endpoints always yield the start point.
    pub fn at(&self, t: f64) -> [f64; 2] {
        if self.distance == 0.0 {
            return self.start;
        }
        let t = t * self.distance;
        let b = t.sin() / self.sin_distance;
        let a = (self.distance - t).sin() / self.sin_distance;
        let x = a * self.k0[0] + b * self.k1[0];
        let y = a * self.k0[1] + b * self.k1[1];
        let z = a * self.k0[2] + b * self.k1[2];
        [y.atan2(x) * DEGREES, z.atan2((x * x + y * y).sqrt()) * DEGREES]
    }
}
