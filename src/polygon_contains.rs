//! Spherical point-in-polygon test.
//!
//! Rings are lists of `[λ, φ]` points in radians without a closing point.
//! The test counts signed crossings of the meridian arc running from the
//! point to the south pole, after first deciding from the ring winding and
//! signed area whether the south pole itself is inside.

use crate::adder::Adder;
use crate::cartesian::{cartesian, cross, normalize};
use crate::math::{asin, sign, EPSILON, EPSILON2, HALF_PI, PI, QUARTER_PI, TAU};

fn longitude(point: [f64; 2]) -> f64 {
    if point[0].abs() <= PI {
        point[0]
    } else {
        sign(point[0]) * ((point[0].abs() + PI) % TAU - PI)
    }
}

pub fn polygon_contains(polygon: &[Vec<[f64; 2]>], point: [f64; 2]) -> bool {
    let lambda = longitude(point);
    let mut phi = point[1];
    let sin_phi = phi.sin();
    let normal = [lambda.sin(), -lambda.cos(), 0.0];
    let mut angle = 0.0;
    let mut winding: i64 = 0;
    let mut sum = Adder::new();

    if sin_phi == 1.0 {
        phi = HALF_PI + EPSILON;
    } else if sin_phi == -1.0 {
        phi = -HALF_PI - EPSILON;
    }

    for ring in polygon {
        let Some(&last) = ring.last() else {
            continue;
        };
        let mut point0 = last;
        let mut lambda0 = longitude(point0);
        let phi0 = point0[1] / 2.0 + QUARTER_PI;
        let mut sin_phi0 = phi0.sin();
        let mut cos_phi0 = phi0.cos();

        for &point1 in ring {
            let lambda1 = longitude(point1);
            let phi1 = point1[1] / 2.0 + QUARTER_PI;
            let sin_phi1 = phi1.sin();
            let cos_phi1 = phi1.cos();
            let delta = lambda1 - lambda0;
            let dir = if delta >= 0.0 { 1.0 } else { -1.0 };
            let abs_delta = dir * delta;
            let antimeridian = abs_delta > PI;
            let k = sin_phi0 * sin_phi1;

            sum.add((k * dir * abs_delta.sin()).atan2(cos_phi0 * cos_phi1 + k * abs_delta.cos()));
            angle += if antimeridian { delta + dir * TAU } else { delta };

            // Do the endpoints straddle the point's meridian?
            if antimeridian ^ (lambda0 >= lambda) ^ (lambda1 >= lambda) {
                let arc = normalize(cross(cartesian(point0), cartesian(point1)));
                let intersection = normalize(cross(normal, arc));
                let descending = antimeridian ^ (delta >= 0.0);
                let phi_arc = if descending { -1.0 } else { 1.0 } * asin(intersection[2]);
                if phi > phi_arc || (phi == phi_arc && (arc[0] != 0.0 || arc[1] != 0.0)) {
                    winding += if descending { 1 } else { -1 };
                }
            }

            lambda0 = lambda1;
            sin_phi0 = sin_phi1;
            cos_phi0 = cos_phi1;
            point0 = point1;
        }
    }

    let south_pole_inside = angle < -EPSILON || (angle < EPSILON && sum.value() < -EPSILON2);
    south_pole_inside ^ (winding & 1 != 0)
}
