//! Sinusoidal (Sanson-Flamsteed) projection on the unit sphere.
//!
//! forward: x = λ·cos(φ), y = φ
//! inverse: λ = x/cos(φ), φ = y

use crate::error::ProjError;
use crate::proj::RawProjection;

#[derive(Clone, Copy, Debug, Default)]
pub struct Sinusoidal;

impl RawProjection for Sinusoidal {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda * phi.cos(), phi)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let cos_lat = y.cos();
        if cos_lat.abs() < 1e-15 {
            // At the poles, longitude is undefined
            return Ok((0.0, y));
        }
        Ok((x / cos_lat, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip() {
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (10.0, 45.0),
            (-73.9857, 40.7484),
            (139.6917, 35.6895),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = Sinusoidal.forward(lon, lat);
            let (lon2, lat2) = Sinusoidal.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-10);
            assert_relative_eq!(lat2, lat, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_equator_matches_equirectangular() {
        let lon = 15.0_f64.to_radians();
        let (x, _) = Sinusoidal.forward(lon, 0.0);
        assert_relative_eq!(x, lon);
    }

    #[test]
    fn test_pole() {
        // At the north pole, x should be 0 for any longitude (cos(90°)=0)
        let (x, _) = Sinusoidal.forward(45.0_f64.to_radians(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(x, 0.0, epsilon = 1e-15);
    }
}
