use pyo3::prelude::*;

mod measure;
mod project;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(project::project_points, m)?)?;
    m.add_function(wrap_pyfunction!(project::invert_points, m)?)?;
    m.add_function(wrap_pyfunction!(measure::geo_area, m)?)?;
    m.add_function(wrap_pyfunction!(measure::geo_length, m)?)?;
    m.add_function(wrap_pyfunction!(measure::geo_bounds, m)?)?;
    m.add_function(wrap_pyfunction!(measure::svg_path, m)?)?;
    Ok(())
}
