//! Equirectangular (Plate Carrée) projection on the unit sphere.
//!
//! forward: x = λ, y = φ
//! inverse: λ = x, φ = y

use crate::error::ProjError;
use crate::proj::RawProjection;

#[derive(Clone, Copy, Debug, Default)]
pub struct Equirectangular;

impl RawProjection for Equirectangular {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, phi)
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        Ok((x, y))
    }
}
