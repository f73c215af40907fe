//! Shared numeric constants and clamped trigonometry.

pub use std::f64::consts::{FRAC_PI_2 as HALF_PI, FRAC_PI_4 as QUARTER_PI, PI, TAU};

/// General angular tolerance.
pub const EPSILON: f64 = 1e-6;

/// Tolerance for squared lengths and areas.
pub const EPSILON2: f64 = 1e-12;

pub const DEGREES: f64 = 180.0 / PI;
pub const RADIANS: f64 = PI / 180.0;

/// `asin` clamped to the valid domain instead of returning NaN.
#[inline]
pub fn asin(x: f64) -> f64 {
    if x > 1.0 {
        HALF_PI
    } else if x < -1.0 {
        -HALF_PI
    } else {
        x.asin()
    }
}

/// `acos` clamped to the valid domain instead of returning NaN.
#[inline]
pub fn acos(x: f64) -> f64 {
    if x > 1.0 {
        0.0
    } else if x < -1.0 {
        PI
    } else {
        x.acos()
    }
}

#[inline]
pub fn haversin(x: f64) -> f64 {
    let s = (x / 2.0).sin();
    s * s
}

/// Sign with JavaScript semantics: zero stays zero.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

#[inline]
pub fn point_equal(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < EPSILON && (a[1] - b[1]).abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamped_trig() {
        assert_relative_eq!(asin(1.5), HALF_PI);
        assert_relative_eq!(asin(-1.5), -HALF_PI);
        assert_relative_eq!(acos(1.0 + 1e-15), 0.0);
        assert_relative_eq!(acos(-2.0), PI);
    }

    #[test]
    fn test_point_equal_tolerance() {
        assert!(point_equal([1.0, 2.0], [1.0 + 1e-7, 2.0 - 1e-7]));
        assert!(!point_equal([1.0, 2.0], [1.0 + 1e-5, 2.0]));
    }
}
