//! Spherical measurements of GeoJSON objects.
//!
//! Inputs are `[longitude, latitude]` in degrees; results are in steradians
//! (area), radians (length), or degrees (bounds, centroid). Each measure is a
//! [`GeoStream`](crate::stream::GeoStream) consumer that can also be driven
//! directly.

pub mod area;
pub mod bounds;
pub mod centroid;
pub mod length;

pub use area::{area, GeoArea};
pub use bounds::{bounds, GeoBounds};
pub use centroid::{centroid, GeoCentroid};
pub use length::{distance, length, GeoLength};
