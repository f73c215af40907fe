//! Spherical Mercator projection.
//!
//!   forward: x = λ, y = ln(tan(π/4 + φ/2))
//!   inverse: λ = x, φ = 2·atan(exp(y)) - π/2
//!
//! The poles map to ±∞; callers clip or avoid them.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;
use crate::proj::RawProjection;

#[derive(Clone, Copy, Debug, Default)]
pub struct Mercator;

impl RawProjection for Mercator {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        Ok((x, 2.0 * y.exp().atan() - FRAC_PI_2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin() {
        let (x, y) = Mercator.forward(0.0, 0.0);
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_roundtrip() {
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (10.0, 45.0),
            (-73.9857, 40.7484), // NYC
            (139.6917, 35.6895), // Tokyo
            (-180.0, -80.0),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = Mercator.forward(lon, lat);
            let (lon2, lat2) = Mercator.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-10);
            assert_relative_eq!(lat2, lat, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_y_grows_towards_pole() {
        let (_, y45) = Mercator.forward(0.0, 45.0_f64.to_radians());
        let (_, y60) = Mercator.forward(0.0, 60.0_f64.to_radians());
        assert!(y60 > y45 && y45 > 0.0);
        assert_relative_eq!(y45, 0.881_373_587_019_543, epsilon = 1e-12);
    }
}
