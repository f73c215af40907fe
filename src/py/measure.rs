//! PyO3 bindings for spherical measures and SVG rendering of GeoJSON strings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::geojson::GeoJson;
use crate::measure::{area, bounds, length};
use crate::path::GeoPath;
use crate::proj::ProjectionOptions;

fn parse(geojson: &str) -> PyResult<GeoJson> {
    geojson
        .parse()
        .map_err(|e: crate::error::GeoError| PyValueError::new_err(e.to_string()))
}

/// Spherical area of a GeoJSON object in steradians.
#[pyfunction]
pub fn geo_area(py: Python<'_>, geojson: &str) -> PyResult<f64> {
    let object = parse(geojson)?;
    Ok(py.allow_threads(move || area(&object)))
}

/// Great-arc length of a GeoJSON object in radians.
#[pyfunction]
pub fn geo_length(py: Python<'_>, geojson: &str) -> PyResult<f64> {
    let object = parse(geojson)?;
    Ok(py.allow_threads(move || length(&object)))
}

/// Spherical bounding box as ((west, south), (east, north)) in degrees.
#[pyfunction]
pub fn geo_bounds(py: Python<'_>, geojson: &str) -> PyResult<((f64, f64), (f64, f64))> {
    let object = parse(geojson)?;
    let [[w, s], [e, n]] = py.allow_threads(move || bounds(&object));
    Ok(((w, s), (e, n)))
}

/// SVG path data for a GeoJSON object.
///
/// Args:
///     geojson: GeoJSON text.
///     options: JSON projection options, or None to render coordinates as-is.
///     point_radius: Radius of the circle drawn for each point.
///     digits: Optional number of decimal places in the output.
#[pyfunction]
#[pyo3(signature = (geojson, options=None, point_radius=4.5, digits=None))]
pub fn svg_path(
    py: Python<'_>,
    geojson: &str,
    options: Option<&str>,
    point_radius: f64,
    digits: Option<u32>,
) -> PyResult<String> {
    let object = parse(geojson)?;
    let projection = options
        .map(|json| {
            ProjectionOptions::from_json(json)
                .map_err(|e| PyValueError::new_err(e.to_string()))?
                .build()
                .map_err(|e| PyValueError::new_err(e.to_string()))
        })
        .transpose()?;

    let mut path = GeoPath::new(projection).with_point_radius(point_radius);
    if let Some(digits) = digits {
        path = path.with_digits(digits);
    }
    Ok(py.allow_threads(move || path.svg(&object)))
}
