//! Spherical geometry on GeoJSON: projections, clipping, adaptive
//! resampling, measurement and path rendering, all built on one streaming
//! protocol ([`stream::GeoStream`]).

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod adder;
pub mod affine;
pub mod cartesian;
pub mod circle;
pub mod clip;
pub mod contains;
pub mod error;
pub mod geojson;
pub mod graticule;
pub mod interpolate;
pub mod math;
pub mod measure;
pub mod path;
pub mod polygon_contains;
pub mod proj;
pub mod resample;
pub mod rotation;
pub mod stream;

#[cfg(feature = "python")]
mod py;

pub use circle::GeoCircle;
pub use contains::contains;
pub use error::{GeoError, ProjError};
pub use geojson::{GeoJson, Position};
pub use graticule::Graticule;
pub use interpolate::{interpolate, GeoInterpolator};
pub use measure::{area, bounds, centroid, distance, length};
pub use path::GeoPath;
pub use proj::{Projection, ProjectionKind, ProjectionOptions};
pub use rotation::GeoRotation;
pub use stream::{stream, GeoStream};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _geostream(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
