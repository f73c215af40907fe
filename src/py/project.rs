//! PyO3 bindings for batch point projection.

use ndarray::Array1;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::proj::{Projection, ProjectionOptions};

fn build(options: &str) -> PyResult<Projection> {
    let options = ProjectionOptions::from_json(options)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    options
        .build()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

fn zip(x: &PyReadonlyArray1<'_, f64>, y: &PyReadonlyArray1<'_, f64>) -> PyResult<Vec<[f64; 2]>> {
    let x = x.as_array();
    let y = y.as_array();
    if x.len() != y.len() {
        return Err(PyValueError::new_err(format!(
            "x and y must have same length, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    Ok(x.iter().zip(y.iter()).map(|(&a, &b)| [a, b]).collect())
}

#[allow(clippy::type_complexity)]
fn unzip<'py>(
    py: Python<'py>,
    points: Vec<[f64; 2]>,
) -> (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>) {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().map(|[a, b]| (a, b)).unzip();
    (
        PyArray1::from_owned_array(py, Array1::from(xs)),
        PyArray1::from_owned_array(py, Array1::from(ys)),
    )
}

/// Project longitude/latitude arrays (degrees) to planar coordinates.
///
/// Args:
///     lon: 1D array of longitudes.
///     lat: 1D array of latitudes.
///     options: JSON projection options, e.g. '{"type": "mercator", "scale": 100}'.
///
/// Returns:
///     Tuple of (x, y) arrays. Points are transformed without clipping.
#[pyfunction]
#[pyo3(signature = (lon, lat, options="{}"))]
#[allow(clippy::type_complexity)]
pub fn project_points<'py>(
    py: Python<'py>,
    lon: PyReadonlyArray1<'py, f64>,
    lat: PyReadonlyArray1<'py, f64>,
    options: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let projection = build(options)?;
    let points = zip(&lon, &lat)?;
    let projected = py.allow_threads(move || {
        points
            .into_iter()
            .map(|p| projection.project(p))
            .collect::<Vec<_>>()
    });
    Ok(unzip(py, projected))
}

/// Invert planar coordinates back to longitude/latitude arrays (degrees).
///
/// Raises ValueError if the projection has no inverse.
#[pyfunction]
#[pyo3(signature = (x, y, options="{}"))]
#[allow(clippy::type_complexity)]
pub fn invert_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    options: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let projection = build(options)?;
    let points = zip(&x, &y)?;
    let inverted = py.allow_threads(move || -> PyResult<Vec<[f64; 2]>> {
        points
            .into_iter()
            .map(|p| {
                projection
                    .invert(p)
                    .map_err(|e| PyValueError::new_err(e.to_string()))
            })
            .collect()
    })?;
    Ok(unzip(py, inverted))
}
