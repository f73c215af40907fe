//! Fit a projection's scale and translate so an object fills a target box.

use crate::error::ProjError;
use crate::geojson::GeoJson;
use crate::path::bounds::PathBounds;
use crate::proj::Projection;
use crate::stream::stream;

impl Projection {
    /// Scale and translate so `object` fits `extent` (`[[x0, y0], [x1, y1]]`),
    /// preserving aspect ratio and centering along the slack axis.
    pub fn fit_extent(
        &mut self,
        extent: [[f64; 2]; 2],
        object: &GeoJson,
    ) -> Result<&mut Self, ProjError> {
        self.fit(object, |b| {
            let w = extent[1][0] - extent[0][0];
            let h = extent[1][1] - extent[0][1];
            let k = (w / (b[1][0] - b[0][0])).min(h / (b[1][1] - b[0][1]));
            let x = extent[0][0] + (w - k * (b[1][0] + b[0][0])) / 2.0;
            let y = extent[0][1] + (h - k * (b[1][1] + b[0][1])) / 2.0;
            (k, [x, y])
        })
    }

    /// [`Projection::fit_extent`] with the extent `[[0, 0], size]`.
    pub fn fit_size(&mut self, size: [f64; 2], object: &GeoJson) -> Result<&mut Self, ProjError> {
        self.fit_extent([[0.0, 0.0], size], object)
    }

    /// Fit the object's width to `width`, top-aligned at y = 0.
    pub fn fit_width(&mut self, width: f64, object: &GeoJson) -> Result<&mut Self, ProjError> {
        self.fit(object, |b| {
            let k = width / (b[1][0] - b[0][0]);
            let x = (width - k * (b[1][0] + b[0][0])) / 2.0;
            let y = -k * b[0][1];
            (k, [x, y])
        })
    }

    /// Fit the object's height to `height`, left-aligned at x = 0.
    pub fn fit_height(&mut self, height: f64, object: &GeoJson) -> Result<&mut Self, ProjError> {
        self.fit(object, |b| {
            let k = height / (b[1][1] - b[0][1]);
            let x = -k * b[0][0];
            let y = (height - k * (b[1][1] + b[0][1])) / 2.0;
            (k, [x, y])
        })
    }

    /// Measure `object` at scale 150 around the origin without any clip
    /// extent, then apply the relative scale and translate that `solve`
    /// derives from the bounds. The projection is left unchanged when the
    /// solution is not finite and positive.
    fn fit(
        &mut self,
        object: &GeoJson,
        solve: impl FnOnce([[f64; 2]; 2]) -> (f64, [f64; 2]),
    ) -> Result<&mut Self, ProjError> {
        let scale = self.scale();
        let translate = self.translate();
        let clip = self.clip_extent();

        self.set_scale(150.0).set_translate([0.0, 0.0]);
        if clip.is_some() {
            self.set_clip_extent(None);
        }
        let mut bounds = PathBounds::new();
        stream(object, &mut self.stream(&mut bounds));
        let b = bounds.result();
        if clip.is_some() {
            self.set_clip_extent(clip);
        }

        let solution = b
            .iter()
            .flatten()
            .all(|v| v.is_finite())
            .then(|| solve(b))
            .filter(|(k, [x, y])| *k > 0.0 && k.is_finite() && x.is_finite() && y.is_finite());
        let Some((k, translate_to)) = solution else {
            tracing::warn!(kind = object.type_name(), "fit target has no usable bounds");
            self.set_scale(scale).set_translate(translate);
            return Err(ProjError::EmptyGeometry);
        };

        self.set_scale(150.0 * k).set_translate(translate_to);
        tracing::debug!(
            scale = self.scale(),
            translate = ?self.translate(),
            "fitted projection"
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ProjError;
    use crate::geojson::GeoJson;
    use crate::path::bounds::PathBounds;
    use crate::proj::{Equirectangular, Projection};
    use crate::stream::stream;
    use approx::assert_relative_eq;

    fn projected_bounds(p: &Projection, object: &GeoJson) -> [[f64; 2]; 2] {
        let mut bounds = PathBounds::new();
        stream(object, &mut p.stream(&mut bounds));
        bounds.result()
    }

    fn square() -> GeoJson {
        GeoJson::polygon(&[&[
            [-10.0, -5.0],
            [-10.0, 5.0],
            [10.0, 5.0],
            [10.0, -5.0],
            [-10.0, -5.0],
        ]])
    }

    #[test]
    fn test_fit_extent() {
        let mut p = Projection::new(Equirectangular);
        p.set_precision(0.0);
        let object = square();
        p.fit_extent([[50.0, 50.0], [250.0, 150.0]], &object)
            .unwrap();
        let b = projected_bounds(&p, &object);
        // 20° x 10° at 2:1 fills the 200 x 100 box exactly.
        assert_relative_eq!(b[0][0], 50.0, epsilon = 1e-6);
        assert_relative_eq!(b[0][1], 50.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][0], 250.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][1], 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_size_centers_slack_axis() {
        let mut p = Projection::new(Equirectangular);
        p.set_precision(0.0);
        let object = square();
        p.fit_size([200.0, 200.0], &object).unwrap();
        let b = projected_bounds(&p, &object);
        assert_relative_eq!(b[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][0], 200.0, epsilon = 1e-6);
        assert_relative_eq!(b[0][1], 50.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][1], 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_width_and_height() {
        let object = square();
        let mut p = Projection::new(Equirectangular);
        p.set_precision(0.0).fit_width(400.0, &object).unwrap();
        let b = projected_bounds(&p, &object);
        assert_relative_eq!(b[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][0], 400.0, epsilon = 1e-6);
        assert_relative_eq!(b[0][1], 0.0, epsilon = 1e-6);

        p.fit_height(50.0, &object).unwrap();
        let b = projected_bounds(&p, &object);
        assert_relative_eq!(b[0][0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[0][1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(b[1][1], 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_keeps_clip_extent() {
        let mut p = Projection::new(Equirectangular);
        let extent = [[0.0, 0.0], [10.0, 10.0]];
        p.set_clip_extent(Some(extent));
        p.fit_size([300.0, 300.0], &square()).unwrap();
        assert_eq!(p.clip_extent(), Some(extent));
    }

    #[test]
    fn test_fit_empty_restores_state() {
        let mut p = Projection::new(Equirectangular);
        p.set_scale(42.0).set_translate([1.0, 2.0]);
        let empty = GeoJson::FeatureCollection { features: vec![] };
        let err = p.fit_size([100.0, 100.0], &empty).unwrap_err();
        assert_eq!(err, ProjError::EmptyGeometry);
        assert_eq!(p.scale(), 42.0);
        assert_eq!(p.translate(), [1.0, 2.0]);
    }

    #[test]
    fn test_fit_flat_axis_is_rejected() {
        let flat = GeoJson::line_string(&[[-10.0, 0.0], [10.0, 0.0]]);
        let upright = GeoJson::line_string(&[[0.0, -10.0], [0.0, 10.0]]);
        let mut p = Projection::new(Equirectangular);
        p.set_scale(42.0).set_translate([1.0, 2.0]);

        assert_eq!(p.fit_height(100.0, &flat).unwrap_err(), ProjError::EmptyGeometry);
        assert_eq!(p.fit_width(100.0, &upright).unwrap_err(), ProjError::EmptyGeometry);
        assert_eq!(p.scale(), 42.0);
        assert_eq!(p.translate(), [1.0, 2.0]);

        // The other axis still has extent, so these succeed.
        p.fit_width(100.0, &flat).unwrap();
        assert!(p.scale().is_finite());
        p.fit_height(100.0, &upright).unwrap();
        assert!(p.scale().is_finite());
        // The box is limited by the finite ratio.
        p.fit_size([100.0, 100.0], &flat).unwrap();
        let [x, y] = p.project([10.0, 0.0]);
        assert_relative_eq!(x, 100.0, epsilon = 1e-6);
        assert_relative_eq!(y, 50.0, epsilon = 1e-6);
    }
}
