//! Sphere rotations.
//!
//! A rotation is a longitude shift Δλ followed by an oblique rotation about
//! the new axis by Δφ (tilt) and Δγ (roll). Every variant carries its exact
//! inverse so the projection pipeline can invert without any projection state.

use crate::math::{asin, DEGREES, PI, RADIANS, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    Identity,
    Lambda(f64),
    PhiGamma(PhiGamma),
    Composite(f64, PhiGamma),
}

/// Precomputed trigonometry of a (Δφ, Δγ) rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhiGamma {
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl PhiGamma {
    fn new(delta_phi: f64, delta_gamma: f64) -> Self {
        Self {
            cos_delta_phi: delta_phi.cos(),
            sin_delta_phi: delta_phi.sin(),
            cos_delta_gamma: delta_gamma.cos(),
            sin_delta_gamma: delta_gamma.sin(),
        }
    }

    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;
        [
            (y * self.cos_delta_gamma - k * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi - z * self.sin_delta_phi),
            asin(k * self.cos_delta_gamma + y * self.sin_delta_gamma),
        ]
    }

    fn invert(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_gamma - y * self.sin_delta_gamma;
        [
            (y * self.cos_delta_gamma + z * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi + k * self.sin_delta_phi),
            asin(k * self.cos_delta_phi - x * self.sin_delta_phi),
        ]
    }
}

/// Wrap a longitude back into [-π, π].
fn wrap(lambda: f64) -> f64 {
    if lambda.abs() > PI {
        lambda - (lambda / TAU).round() * TAU
    } else {
        lambda
    }
}

impl Rotation {
    /// Build a rotation from angles in radians.
    pub fn new(delta_lambda: f64, delta_phi: f64, delta_gamma: f64) -> Self {
        let delta_lambda = delta_lambda % TAU;
        let oblique = delta_phi != 0.0 || delta_gamma != 0.0;
        match (delta_lambda != 0.0, oblique) {
            (true, true) => {
                Rotation::Composite(delta_lambda, PhiGamma::new(delta_phi, delta_gamma))
            }
            (true, false) => Rotation::Lambda(delta_lambda),
            (false, true) => Rotation::PhiGamma(PhiGamma::new(delta_phi, delta_gamma)),
            (false, false) => Rotation::Identity,
        }
    }

    pub fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        match self {
            Rotation::Identity => [wrap(lambda), phi],
            Rotation::Lambda(delta) => [wrap(lambda + delta), phi],
            Rotation::PhiGamma(pg) => pg.forward(lambda, phi),
            Rotation::Composite(delta, pg) => pg.forward(wrap(lambda + delta), phi),
        }
    }

    pub fn invert(&self, lambda: f64, phi: f64) -> [f64; 2] {
        match self {
            Rotation::Identity => [wrap(lambda), phi],
            Rotation::Lambda(delta) => [wrap(lambda - delta), phi],
            Rotation::PhiGamma(pg) => pg.invert(lambda, phi),
            Rotation::Composite(delta, pg) => {
                let [l, p] = pg.invert(lambda, phi);
                [wrap(l - delta), p]
            }
        }
    }
}

/// Degree-based rotation for callers outside the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoRotation {
    rotation: Rotation,
}

impl GeoRotation {
    /// `angles` is `[λ, φ]` or `[λ, φ, γ]` in degrees; missing γ is zero.
    pub fn new(angles: &[f64]) -> Self {
        let get = |i: usize| angles.get(i).copied().unwrap_or(0.0) * RADIANS;
        Self {
            rotation: Rotation::new(get(0), get(1), get(2)),
        }
    }

    pub fn forward(&self, point: [f64; 2]) -> [f64; 2] {
        let [l, p] = self.rotation.forward(point[0] * RADIANS, point[1] * RADIANS);
        [l * DEGREES, p * DEGREES]
    }

    pub fn invert(&self, point: [f64; 2]) -> [f64; 2] {
        let [l, p] = self.rotation.invert(point[0] * RADIANS, point[1] * RADIANS);
        [l * DEGREES, p * DEGREES]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_fast_path() {
        assert_eq!(Rotation::new(0.0, 0.0, 0.0), Rotation::Identity);
        assert_eq!(Rotation::new(TAU, 0.0, 0.0), Rotation::Identity);
        assert!(matches!(Rotation::new(0.5, 0.0, 0.0), Rotation::Lambda(_)));
        assert!(matches!(Rotation::new(0.0, 0.5, 0.0), Rotation::PhiGamma(_)));
        assert!(matches!(Rotation::new(0.5, 0.0, 0.1), Rotation::Composite(..)));
    }

    #[test]
    fn test_invert_roundtrip() {
        let rotations = [
            Rotation::new(0.0, 0.0, 0.0),
            Rotation::new(1.1, 0.0, 0.0),
            Rotation::new(0.0, -0.4, 0.0),
            Rotation::new(0.0, 0.0, 2.5),
            Rotation::new(-2.0, 0.7, -1.3),
        ];
        let points = [[0.0, 0.0], [3.0, 1.2], [-2.9, -0.3], [0.5, -1.5], [1.7, 0.01]];
        for r in &rotations {
            for p in &points {
                let f = r.forward(p[0], p[1]);
                let q = r.invert(f[0], f[1]);
                assert_relative_eq!(q[0], p[0], epsilon = 1e-12);
                assert_relative_eq!(q[1], p[1], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_longitude_wraps() {
        let r = GeoRotation::new(&[90.0, 0.0]);
        let p = r.forward([100.0, 10.0]);
        assert_relative_eq!(p[0], -170.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tilt_moves_pole() {
        // Tilting by 90° brings (0°, 0°) to the north pole.
        let r = GeoRotation::new(&[0.0, 90.0]);
        let p = r.forward([0.0, 0.0]);
        assert_relative_eq!(p[1], 90.0, epsilon = 1e-9);
    }
}
