use crate::error::GeoError;

/// A 2D affine transform from raw projected coordinates to screen space.
///
///   x' = a * x + b * y + c
///   y' = d * x + e * y + f
///
/// Screen y grows downwards, so the transforms built by
/// [`Affine::scale_translate_rotate`] flip the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Scale by `k`, reflect by `sx`/`sy` (each ±1), rotate by `alpha`
    /// radians and translate to `(dx, dy)`, with y flipped.
    pub fn scale_translate_rotate(k: f64, dx: f64, dy: f64, sx: f64, sy: f64, alpha: f64) -> Self {
        let (sin_alpha, cos_alpha) = if alpha == 0.0 {
            (0.0, 1.0)
        } else {
            alpha.sin_cos()
        };
        Self {
            a: k * cos_alpha * sx,
            b: -k * sin_alpha * sy,
            c: dx,
            d: -k * sin_alpha * sx,
            e: -k * cos_alpha * sy,
            f: dy,
        }
    }

    /// Apply the forward transform.
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    /// Compute the inverse affine transform.
    pub fn inverse(&self) -> Result<Affine, GeoError> {
        let det = self.a * self.e - self.b * self.d;
        if det == 0.0 || !det.is_finite() {
            return Err(GeoError::Affine(
                "Singular affine transform (determinant is zero)".into(),
            ));
        }
        let inv_det = 1.0 / det;
        Ok(Affine {
            a: self.e * inv_det,
            b: -self.b * inv_det,
            c: (self.b * self.f - self.e * self.c) * inv_det,
            d: -self.d * inv_det,
            e: self.a * inv_det,
            f: (self.d * self.c - self.a * self.f) * inv_det,
        })
    }
}
