//! Shared forms of the azimuthal projections.
//!
//! An azimuthal projection is fixed by how it scales the angular distance
//! `c` from the centre: forward uses `k(cos c)`, inverse recovers `c` from
//! the planar radius.

use crate::math::asin;

/// Forward azimuthal projection with radial scale `k(cos c)`. Points where
/// the scale is infinite (the antipode of a stereographic centre) map to a
/// fixed point outside the unit disc.
pub fn azimuthal_forward(lambda: f64, phi: f64, k: impl Fn(f64) -> f64) -> (f64, f64) {
    let cx = lambda.cos();
    let cy = phi.cos();
    let k = k(cx * cy);
    if k.is_infinite() {
        return (2.0, 0.0);
    }
    (k * cy * lambda.sin(), k * phi.sin())
}

/// Inverse azimuthal projection where `angle(ρ)` gives the angular distance
/// for planar radius ρ.
pub fn azimuthal_inverse(x: f64, y: f64, angle: impl Fn(f64) -> f64) -> (f64, f64) {
    let z = (x * x + y * y).sqrt();
    let c = angle(z);
    let (sc, cc) = c.sin_cos();
    let phi = if z == 0.0 { 0.0 } else { asin(y * sc / z) };
    ((x * sc).atan2(z * cc), phi)
}
