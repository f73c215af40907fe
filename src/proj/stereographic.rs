//! Spherical stereographic projection from the antipode of the centre.
//!
//! forward: azimuthal with k = 1 / (1 + cos c)
//! inverse: azimuthal with c = 2·atan(ρ)

use crate::error::ProjError;
use crate::proj::azimuthal::{azimuthal_forward, azimuthal_inverse};
use crate::proj::RawProjection;

#[derive(Clone, Copy, Debug, Default)]
pub struct Stereographic;

impl RawProjection for Stereographic {
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        azimuthal_forward(lambda, phi, |cos_c| 1.0 / (1.0 + cos_c))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        Ok(azimuthal_inverse(x, y, |z| 2.0 * z.atan()))
    }
}
