use crate::adder::Adder;
use crate::geojson::GeoJson;
use crate::math::{QUARTER_PI, RADIANS, TAU};
use crate::stream::{stream, GeoStream};

/// Running signed excess of one ring, measured as the sum of the triangles
/// each edge forms with the south pole.
#[derive(Clone, Copy, Debug, Default)]
struct RingArea {
    start: Option<[f64; 2]>,
    lambda0: f64,
    cos_phi0: f64,
    sin_phi0: f64,
}

impl RingArea {
    fn point(&mut self, lambda: f64, phi: f64, sum: &mut Adder) {
        let l = lambda * RADIANS;
        // Half the angular distance from the south pole.
        let (sin_phi, cos_phi) = (phi * RADIANS / 2.0 + QUARTER_PI).sin_cos();
        if self.start.is_none() {
            self.start = Some([lambda, phi]);
        } else {
            let d_lambda = l - self.lambda0;
            let sd_lambda = if d_lambda >= 0.0 { 1.0 } else { -1.0 };
            let ad_lambda = sd_lambda * d_lambda;
            let k = self.sin_phi0 * sin_phi;
            let u = self.cos_phi0 * cos_phi + k * ad_lambda.cos();
            let v = k * sd_lambda * ad_lambda.sin();
            sum.add(v.atan2(u));
        }
        self.lambda0 = l;
        self.cos_phi0 = cos_phi;
        self.sin_phi0 = sin_phi;
    }

    fn end(&mut self, sum: &mut Adder) {
        if let Some([lambda, phi]) = self.start {
            self.point(lambda, phi, sum);
        }
        self.start = None;
    }
}

/// Spherical area consumer. Only polygons and the sphere contribute.
#[derive(Debug, Default)]
pub struct GeoArea {
    sum: Adder,
    polygon_sum: Adder,
    ring: RingArea,
    in_polygon: bool,
    in_ring: bool,
}

impl GeoArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total area in steradians.
    pub fn result(&self) -> f64 {
        self.sum.value() * 2.0
    }
}

impl GeoStream for GeoArea {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_ring {
            self.ring.point(x, y, &mut self.polygon_sum);
        }
    }

    fn line_start(&mut self) {
        self.in_ring = self.in_polygon;
    }

    fn line_end(&mut self) {
        if self.in_ring {
            self.ring.end(&mut self.polygon_sum);
            self.in_ring = false;
        }
    }

    fn polygon_start(&mut self) {
        self.polygon_sum = Adder::new();
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        // A negative excess means the ring winds the other way around the
        // south pole, so the polygon is the complement.
        let area = self.polygon_sum.value();
        self.sum.add(if area < 0.0 { TAU + area } else { area });
        self.in_polygon = false;
    }

    fn sphere(&mut self) {
        self.sum.add(TAU);
    }
}

/// Spherical area of `object` in steradians; the whole sphere is 4π.
pub fn area(object: &GeoJson) -> f64 {
    let mut sink = GeoArea::new();
    stream(object, &mut sink);
    sink.result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PI;
    use approx::assert_relative_eq;

    const SQUARE: [[f64; 2]; 5] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    #[test]
    fn test_sphere() {
        assert_relative_eq!(area(&GeoJson::Sphere), 4.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_northern_hemisphere() {
        let ring = [[0.0, 0.0], [-90.0, 0.0], [180.0, 0.0], [90.0, 0.0], [0.0, 0.0]];
        assert_relative_eq!(area(&GeoJson::polygon(&[&ring])), 2.0 * PI, epsilon = 1e-6);
    }

    #[test]
    fn test_small_square() {
        let a = area(&GeoJson::polygon(&[&SQUARE]));
        let expected = RADIANS * RADIANS;
        assert_relative_eq!(a, expected, max_relative = 1e-3);
    }

    #[test]
    fn test_reversed_ring_is_complement() {
        let mut ring = SQUARE;
        ring.reverse();
        let small = area(&GeoJson::polygon(&[&SQUARE]));
        let large = area(&GeoJson::polygon(&[&ring]));
        assert_relative_eq!(small + large, 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_hole_subtracts() {
        let outer = [[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0]];
        let hole = [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]];
        let solid = area(&GeoJson::polygon(&[&outer]));
        let holed = area(&GeoJson::polygon(&[&outer, &hole]));
        let hole_only = area(&GeoJson::polygon(&[&[
            [4.0, 4.0],
            [4.0, 6.0],
            [6.0, 6.0],
            [6.0, 4.0],
            [4.0, 4.0],
        ]]));
        assert_relative_eq!(holed, solid - hole_only, epsilon = 1e-12);
    }

    #[test]
    fn test_lines_and_points_have_no_area() {
        assert_eq!(area(&GeoJson::line_string(&SQUARE)), 0.0);
        assert_eq!(area(&GeoJson::point([1.0, 2.0])), 0.0);
    }
}
