//! Conversions between spherical coordinates and unit vectors.
//!
//! Spherical points are `[λ, φ]` in radians; Cartesian points are
//! `[x, y, z]` with `x` towards (0°, 0°) and `z` towards the north pole.

use crate::math::asin;

pub type Vec3 = [f64; 3];

pub fn spherical(v: Vec3) -> [f64; 2] {
    [v[1].atan2(v[0]), asin(v[2])]
}

pub fn cartesian(p: [f64; 2]) -> Vec3 {
    let (lambda, phi) = (p[0], p[1]);
    let cos_phi = phi.cos();
    [cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin()]
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn scale(v: Vec3, k: f64) -> Vec3 {
    [v[0] * k, v[1] * k, v[2] * k]
}

/// Scale `v` to unit length. A zero vector becomes NaN, which callers treat
/// as "no direction".
pub fn normalize(v: Vec3) -> Vec3 {
    let l = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / l, v[1] / l, v[2] / l]
}
