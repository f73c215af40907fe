use crate::cartesian::{cartesian, cross, normalize, spherical, Vec3};
use crate::geojson::GeoJson;
use crate::math::{DEGREES, EPSILON, HALF_PI, RADIANS};
use crate::polygon_contains::polygon_contains;
use crate::stream::{stream, GeoStream};

/// Eastward distance in degrees from longitude `a` to longitude `b`.
fn span(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// Whether longitude `x` lies in `range`, which wraps when `range[0] > range[1]`.
fn range_contains(range: [f64; 2], x: f64) -> bool {
    if range[0] <= range[1] {
        range[0] <= x && x <= range[1]
    } else {
        x < range[0] || range[1] < x
    }
}

/// Spherical bounding box consumer.
///
/// Each line or ring yields a longitude range that may wrap across the
/// antimeridian; great arcs contribute their latitude extremes, not just
/// their vertices. At the end the ranges are merged and the largest gap
/// between them becomes the outside of the box. A polygon enclosing a pole
/// extends to it and spans every longitude.
#[derive(Debug)]
pub struct GeoBounds {
    lambda0: f64,
    phi0: f64,
    lambda1: f64,
    phi1: f64,
    /// Previous longitude on the current line.
    lambda2: f64,
    p0: Option<Vec3>,
    ranges: Vec<[f64; 2]>,
    in_line: bool,
    /// Rings of the current polygon in radians, for the pole tests.
    rings: Option<Vec<Vec<[f64; 2]>>>,
    ring_start: Option<[f64; 2]>,
    delta_sum: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self {
            lambda0: f64::INFINITY,
            phi0: f64::INFINITY,
            lambda1: f64::NEG_INFINITY,
            phi1: f64::NEG_INFINITY,
            lambda2: 0.0,
            p0: None,
            ranges: Vec::new(),
            in_line: false,
            rings: None,
            ring_start: None,
            delta_sum: 0.0,
        }
    }
}

impl GeoBounds {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_phi(&mut self, phi: f64) {
        if phi < self.phi0 {
            self.phi0 = phi;
        }
        if phi > self.phi1 {
            self.phi1 = phi;
        }
    }

    fn close_range(&mut self) {
        if let Some(range) = self.ranges.last_mut() {
            *range = [self.lambda0, self.lambda1];
        }
    }

    fn bare_point(&mut self, lambda: f64, phi: f64) {
        self.lambda0 = lambda;
        self.lambda1 = lambda;
        self.ranges.push([lambda, lambda]);
        self.update_phi(phi);
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        let p = cartesian([lambda * RADIANS, phi * RADIANS]);
        if let Some(p0) = self.p0 {
            let normal = cross(p0, p);
            let equatorial = [normal[1], -normal[0], 0.0];
            let inflection = spherical(normalize(cross(equatorial, normal)));
            let lambda2 = self.lambda2;
            let delta = lambda - lambda2;
            let sign = if delta > 0.0 { 1.0 } else { -1.0 };
            let antimeridian = delta.abs() > 180.0;
            let between = |l: f64| sign * lambda2 < l && l < sign * lambda;

            // The arc's extreme latitude, if it falls inside the segment.
            let lambda_i = inflection[0] * DEGREES * sign;
            let lambda_i_south = (lambda_i + 360.0) % 360.0 - 180.0;
            if antimeridian ^ between(lambda_i) {
                let phi_i = inflection[1] * DEGREES;
                if phi_i > self.phi1 {
                    self.phi1 = phi_i;
                }
            } else if antimeridian ^ between(lambda_i_south) {
                let phi_i = -inflection[1] * DEGREES;
                if phi_i < self.phi0 {
                    self.phi0 = phi_i;
                }
            }

            let width = span(self.lambda0, self.lambda1);
            if antimeridian {
                if lambda < lambda2 {
                    if span(self.lambda0, lambda) > width {
                        self.lambda1 = lambda;
                    }
                } else if span(lambda, self.lambda1) > width {
                    self.lambda0 = lambda;
                }
            } else if self.lambda1 >= self.lambda0 {
                if lambda < self.lambda0 {
                    self.lambda0 = lambda;
                }
                if lambda > self.lambda1 {
                    self.lambda1 = lambda;
                }
            } else if lambda > lambda2 {
                if span(self.lambda0, lambda) > width {
                    self.lambda1 = lambda;
                }
            } else if span(lambda, self.lambda1) > width {
                self.lambda0 = lambda;
            }
        } else {
            self.lambda0 = lambda;
            self.lambda1 = lambda;
            self.ranges.push([lambda, lambda]);
        }
        self.update_phi(phi);
        self.p0 = Some(p);
        self.lambda2 = lambda;
    }

    fn ring_point(&mut self, lambda: f64, phi: f64) {
        if self.p0.is_some() {
            let delta = lambda - self.lambda2;
            self.delta_sum += if delta > 180.0 {
                delta - 360.0
            } else if delta < -180.0 {
                delta + 360.0
            } else {
                delta
            };
        } else {
            self.ring_start = Some([lambda, phi]);
        }
        if let Some(ring) = self.rings.as_mut().and_then(|rings| rings.last_mut()) {
            ring.push([lambda * RADIANS, phi * RADIANS]);
        }
        self.line_point(lambda, phi);
    }

    /// `[[west, south], [east, north]]` in degrees. West exceeds east when
    /// the box crosses the antimeridian. Empty input gives NaN corners.
    pub fn result(&self) -> [[f64; 2]; 2] {
        let (mut lambda0, mut lambda1) = (self.lambda0, self.lambda1);
        if !self.ranges.is_empty() {
            let mut ranges = self.ranges.clone();
            ranges.sort_by(|a, b| a[0].total_cmp(&b[0]));

            let mut merged: Vec<[f64; 2]> = Vec::with_capacity(ranges.len());
            for b in ranges {
                match merged.last_mut() {
                    Some(a) if range_contains(*a, b[0]) || range_contains(*a, b[1]) => {
                        if span(a[0], b[1]) > span(a[0], a[1]) {
                            a[1] = b[1];
                        }
                        if span(b[0], a[1]) > span(a[0], a[1]) {
                            a[0] = b[0];
                        }
                    }
                    _ => merged.push(b),
                }
            }

            // The widest gap between consecutive ranges is outside the box.
            let mut gap = f64::NEG_INFINITY;
            let mut a = merged[merged.len() - 1];
            for &b in &merged {
                let delta = span(a[1], b[0]);
                if delta > gap {
                    gap = delta;
                    lambda0 = b[0];
                    lambda1 = a[1];
                }
                a = b;
            }
        }
        if lambda0 == f64::INFINITY || self.phi0 == f64::INFINITY {
            [[f64::NAN, f64::NAN], [f64::NAN, f64::NAN]]
        } else {
            [[lambda0, self.phi0], [lambda1, self.phi1]]
        }
    }
}

impl GeoStream for GeoBounds {
    fn point(&mut self, x: f64, y: f64) {
        match (self.in_line, self.rings.is_some()) {
            (false, _) => self.bare_point(x, y),
            (true, false) => self.line_point(x, y),
            (true, true) => self.ring_point(x, y),
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        if let Some(rings) = &mut self.rings {
            rings.push(Vec::new());
            self.delta_sum = 0.0;
        }
    }

    fn line_end(&mut self) {
        if self.rings.is_some() {
            if let Some([lambda, phi]) = self.ring_start.take() {
                self.ring_point(lambda, phi);
            }
            // Winding once around a pole covers every longitude.
            if self.delta_sum.abs() > EPSILON {
                self.lambda0 = -180.0;
                self.lambda1 = 180.0;
            }
            if let Some(ring) = self.rings.as_mut().and_then(|rings| rings.last_mut()) {
                // The closing point duplicates the first.
                ring.pop();
            }
        }
        self.close_range();
        self.in_line = false;
        self.p0 = None;
    }

    fn polygon_start(&mut self) {
        self.rings = Some(Vec::new());
    }

    fn polygon_end(&mut self) {
        let Some(rings) = self.rings.take() else {
            return;
        };
        let north = polygon_contains(&rings, [0.0, HALF_PI]);
        let south = polygon_contains(&rings, [0.0, -HALF_PI]);
        if north || south {
            self.lambda0 = -180.0;
            self.lambda1 = 180.0;
        }
        if north {
            self.phi1 = 90.0;
        }
        if south {
            self.phi0 = -90.0;
        }
        self.close_range();
    }

    fn sphere(&mut self) {
        self.lambda0 = -180.0;
        self.lambda1 = 180.0;
        self.phi0 = -90.0;
        self.phi1 = 90.0;
    }
}

/// Spherical bounding box of `object`; see [`GeoBounds::result`].
pub fn bounds(object: &GeoJson) -> [[f64; 2]; 2] {
    let mut sink = GeoBounds::new();
    stream(object, &mut sink);
    sink.result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::clip_antimeridian;
    use crate::graticule::Graticule;
    use approx::assert_relative_eq;

    fn assert_bounds(actual: [[f64; 2]; 2], expected: [[f64; 2]; 2], epsilon: f64) {
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(actual[i][j], expected[i][j], epsilon = epsilon);
            }
        }
    }

    /// Scales every coordinate, for moving between degrees and radians.
    struct Scale<S> {
        k: f64,
        sink: S,
    }

    impl<S: GeoStream> GeoStream for Scale<S> {
        fn point(&mut self, x: f64, y: f64) {
            self.sink.point(x * self.k, y * self.k);
        }
        fn line_start(&mut self) {
            self.sink.line_start();
        }
        fn line_end(&mut self) {
            self.sink.line_end();
        }
        fn polygon_start(&mut self) {
            self.sink.polygon_start();
        }
        fn polygon_end(&mut self) {
            self.sink.polygon_end();
        }
        fn sphere(&mut self) {
            self.sink.sphere();
        }
    }

    #[test]
    fn test_point() {
        assert_bounds(
            bounds(&GeoJson::point([-12.0, 34.0])),
            [[-12.0, 34.0], [-12.0, 34.0]],
            0.0,
        );
    }

    #[test]
    fn test_empty_is_nan() {
        let b = bounds(&GeoJson::FeatureCollection { features: vec![] });
        assert!(b.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sphere() {
        assert_bounds(bounds(&GeoJson::Sphere), [[-180.0, -90.0], [180.0, 90.0]], 0.0);
    }

    #[test]
    fn test_line_crossing_antimeridian() {
        let line = GeoJson::line_string(&[[170.0, 0.0], [-170.0, 0.0]]);
        assert_bounds(bounds(&line), [[170.0, 0.0], [-170.0, 0.0]], 1e-9);
    }

    #[test]
    fn test_great_arc_bulges_poleward() {
        let line = GeoJson::line_string(&[[-45.0, 45.0], [45.0, 45.0]]);
        let b = bounds(&line);
        assert_relative_eq!(b[0][1], 45.0, epsilon = 1e-9);
        // The arc peaks above 45° at the midpoint.
        assert_relative_eq!(b[1][1], 54.735_610_317_245_35, epsilon = 1e-6);
    }

    #[test]
    fn test_polygon() {
        let ring = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        assert_bounds(
            bounds(&GeoJson::polygon(&[&ring])),
            [[0.0, 0.0], [1.0, 1.0]],
            1e-3,
        );
    }

    #[test]
    fn test_polygon_around_north_pole() {
        let ring = [[60.0, 80.0], [-60.0, 80.0], [-180.0, 80.0], [60.0, 80.0]];
        assert_bounds(
            bounds(&GeoJson::polygon(&[&ring])),
            [[-180.0, 80.0], [180.0, 90.0]],
            1e-6,
        );
    }

    #[test]
    fn test_multipoint_picks_smallest_wrap() {
        let points = GeoJson::MultiPoint {
            coordinates: vec![[-170.0, 0.0].into(), [170.0, 10.0].into(), [175.0, 5.0].into()],
        };
        assert_bounds(bounds(&points), [[170.0, 0.0], [-170.0, 10.0]], 0.0);
    }

    #[test]
    fn test_clipped_graticule_outline_is_global() {
        let outline = Graticule::default().outline();
        let mut sink = GeoBounds::new();
        let mut to_degrees = Scale {
            k: DEGREES,
            sink: &mut sink,
        };
        let mut chain = Scale {
            k: RADIANS,
            sink: clip_antimeridian(&mut to_degrees),
        };
        stream(&outline, &mut chain);
        drop(chain);
        assert_bounds(sink.result(), [[-180.0, -90.0], [180.0, 90.0]], 1e-4);
    }
}
