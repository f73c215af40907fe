pub mod azimuthal;
pub mod equirectangular;
pub mod fit;
pub mod mercator;
pub mod options;
pub mod orthographic;
pub mod pipeline;
pub mod sinusoidal;
pub mod stereographic;

use std::fmt::Debug;

use crate::error::ProjError;

pub use equirectangular::Equirectangular;
pub use mercator::Mercator;
pub use options::{ProjectionKind, ProjectionOptions};
pub use orthographic::Orthographic;
pub use pipeline::{Projection, ProjectionStream};
pub use sinusoidal::Sinusoidal;
pub use stereographic::Stereographic;

/// A raw spherical projection formula on the unit sphere.
pub trait RawProjection: Send + Sync + Debug {
    /// Forward: (λ, φ) in radians -> unscaled planar (x, y) with y up.
    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64);

    /// Inverse: planar (x, y) -> (λ, φ) in radians.
    fn inverse(&self, _x: f64, _y: f64) -> Result<(f64, f64), ProjError> {
        Err(ProjError::NoInverse)
    }

    /// Batch forward transform (default: loop).
    fn forward_batch(&self, coords: &mut [(f64, f64)]) {
        for c in coords.iter_mut() {
            *c = self.forward(c.0, c.1);
        }
    }

    /// Batch inverse transform.
    fn inverse_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        for c in coords.iter_mut() {
            *c = self.inverse(c.0, c.1)?;
        }
        Ok(())
    }
}
