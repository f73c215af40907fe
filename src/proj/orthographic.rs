//! Orthographic projection: the globe seen from infinitely far away.
//!
//! forward: x = cos(φ)·sin(λ), y = sin(φ)
//! inverse: azimuthal with c = asin(ρ)
//!
//! Only the near hemisphere is meaningful; the usual clip angle is 90°.

use crate::error::ProjError;
use crate::math::asin;
use crate::proj::azimuthal::azimuthal_inverse;
use crate::proj::RawProjection;

#[derive(Clone, Copy, Debug, Default)]
pub struct Orthographic;

impl RawProjection for Orthographic {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (phi.cos() * lambda.sin(), phi.sin())
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        Ok(azimuthal_inverse(x, y, asin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip_near_hemisphere() {
        let cases: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 45.0), (-60.0, -20.0), (80.0, 5.0)];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = Orthographic.forward(lon, lat);
            let (lon2, lat2) = Orthographic.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-10);
            assert_relative_eq!(lat2, lat, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_limb_on_unit_circle() {
        let (x, y) = Orthographic.forward(std::f64::consts::FRAC_PI_2, 0.3);
        assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-12);
    }
}
