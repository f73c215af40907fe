//! The configurable projection pipeline.
//!
//! A [`Projection`] wraps a [`RawProjection`] with scale, translate, center,
//! rotation, screen angle, reflection, clipping and resampling precision.
//! Streaming geometry through it runs, in order:
//!
//!   degrees -> radians -> rotate -> pre-clip on the sphere
//!   -> resample + project + affine -> post-clip on the plane -> sink
//!
//! The sink-independent stage plan is built lazily and cached until the next
//! setter; each call to [`Projection::stream`] allocates fresh clip and
//! resample state around the caller's sink.

use std::sync::{Arc, OnceLock};

use crate::affine::Affine;
use crate::clip::{clip_antimeridian, Antimeridian, CircleClip, Clip, ClipRectangle};
use crate::error::ProjError;
use crate::math::{DEGREES, RADIANS};
use crate::proj::RawProjection;
use crate::resample::{PointProjector, Resample};
use crate::rotation::Rotation;
use crate::stream::GeoStream;

/// Raw projection followed by the scale/translate/angle/reflect affine.
#[derive(Clone, Debug)]
pub struct ProjectTransform {
    raw: Arc<dyn RawProjection>,
    transform: Affine,
}

impl PointProjector for ProjectTransform {
    fn project(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let (x, y) = self.raw.forward(lambda, phi);
        let (x, y) = self.transform.forward(x, y);
        [x, y]
    }
}

/// Everything [`Projection::stream`] needs that does not depend on the sink.
#[derive(Clone, Debug)]
struct Stages {
    rotation: Rotation,
    preclip: Option<CircleClip>,
    project: ProjectTransform,
    delta2: f64,
    postclip: Option<[[f64; 2]; 2]>,
}

#[derive(Clone, Debug)]
pub struct Projection {
    raw: Arc<dyn RawProjection>,
    k: f64,
    x: f64,
    y: f64,
    lambda: f64,
    phi: f64,
    delta_lambda: f64,
    delta_phi: f64,
    delta_gamma: f64,
    alpha: f64,
    sx: f64,
    sy: f64,
    theta: Option<f64>,
    extent: Option<[[f64; 2]; 2]>,
    delta2: f64,
    rotation: Rotation,
    transform: Affine,
    stages: OnceLock<Stages>,
}

impl Projection {
    pub fn new(raw: impl RawProjection + 'static) -> Self {
        Self::from_raw(Arc::new(raw))
    }

    /// A projection with scale 150, translate (480, 250), no rotation,
    /// antimeridian clipping and precision √0.5.
    pub fn from_raw(raw: Arc<dyn RawProjection>) -> Self {
        let mut projection = Self {
            raw,
            k: 150.0,
            x: 480.0,
            y: 250.0,
            lambda: 0.0,
            phi: 0.0,
            delta_lambda: 0.0,
            delta_phi: 0.0,
            delta_gamma: 0.0,
            alpha: 0.0,
            sx: 1.0,
            sy: 1.0,
            theta: None,
            extent: None,
            delta2: 0.5,
            rotation: Rotation::Identity,
            transform: Affine::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0),
            stages: OnceLock::new(),
        };
        projection.recenter();
        projection
    }

    pub fn raw(&self) -> &Arc<dyn RawProjection> {
        &self.raw
    }

    pub fn scale(&self) -> f64 {
        self.k
    }

    pub fn set_scale(&mut self, k: f64) -> &mut Self {
        self.k = k;
        self.recenter()
    }

    pub fn translate(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn set_translate(&mut self, translate: [f64; 2]) -> &mut Self {
        self.x = translate[0];
        self.y = translate[1];
        self.recenter()
    }

    /// Center in degrees, expressed in the rotated frame.
    pub fn center(&self) -> [f64; 2] {
        [self.lambda * DEGREES, self.phi * DEGREES]
    }

    pub fn set_center(&mut self, center: [f64; 2]) -> &mut Self {
        self.lambda = center[0] % 360.0 * RADIANS;
        self.phi = center[1] % 360.0 * RADIANS;
        self.recenter()
    }

    /// Rotation angles `[Δλ, Δφ, Δγ]` in degrees.
    pub fn rotate(&self) -> [f64; 3] {
        [
            self.delta_lambda * DEGREES,
            self.delta_phi * DEGREES,
            self.delta_gamma * DEGREES,
        ]
    }

    /// Set the rotation from two or three angles in degrees; a missing
    /// angle is zero.
    pub fn set_rotate(&mut self, angles: &[f64]) -> &mut Self {
        let angle = |i: usize| angles.get(i).copied().unwrap_or(0.0) % 360.0 * RADIANS;
        self.delta_lambda = angle(0);
        self.delta_phi = angle(1);
        self.delta_gamma = angle(2);
        self.recenter()
    }

    /// Post-projection rotation of the plane, in degrees.
    pub fn angle(&self) -> f64 {
        self.alpha * DEGREES
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        self.alpha = angle % 360.0 * RADIANS;
        self.recenter()
    }

    pub fn reflect_x(&self) -> bool {
        self.sx < 0.0
    }

    pub fn set_reflect_x(&mut self, reflect: bool) -> &mut Self {
        self.sx = if reflect { -1.0 } else { 1.0 };
        self.recenter()
    }

    pub fn reflect_y(&self) -> bool {
        self.sy < 0.0
    }

    pub fn set_reflect_y(&mut self, reflect: bool) -> &mut Self {
        self.sy = if reflect { -1.0 } else { 1.0 };
        self.recenter()
    }

    /// Resampling tolerance in output units.
    pub fn precision(&self) -> f64 {
        self.delta2.sqrt()
    }

    /// Zero disables adaptive resampling.
    pub fn set_precision(&mut self, precision: f64) -> &mut Self {
        self.delta2 = precision * precision;
        self.reset()
    }

    /// Small-circle clip radius in degrees, or `None` for antimeridian
    /// clipping.
    pub fn clip_angle(&self) -> Option<f64> {
        self.theta.map(|theta| theta * DEGREES)
    }

    /// `None` or zero selects antimeridian clipping.
    pub fn set_clip_angle(&mut self, angle: Option<f64>) -> &mut Self {
        self.theta = angle.filter(|&a| a != 0.0).map(|a| a * RADIANS);
        self.reset()
    }

    pub fn clip_extent(&self) -> Option<[[f64; 2]; 2]> {
        self.extent
    }

    pub fn set_clip_extent(&mut self, extent: Option<[[f64; 2]; 2]>) -> &mut Self {
        self.extent = extent;
        self.reset()
    }

    /// Project `[longitude, latitude]` in degrees to screen coordinates.
    ///
    /// No clipping is applied; use [`Projection::stream`] for geometry.
    pub fn project(&self, point: [f64; 2]) -> [f64; 2] {
        let [lambda, phi] = self
            .rotation
            .forward(point[0] * RADIANS, point[1] * RADIANS);
        let (x, y) = self.raw.forward(lambda, phi);
        let (x, y) = self.transform.forward(x, y);
        [x, y]
    }

    /// Map screen coordinates back to `[longitude, latitude]` in degrees.
    pub fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], ProjError> {
        let inverse = self
            .transform
            .inverse()
            .map_err(|e| ProjError::InvalidParameter(e.to_string()))?;
        let (x, y) = inverse.forward(point[0], point[1]);
        let (lambda, phi) = self.raw.inverse(x, y)?;
        let [lambda, phi] = self.rotation.invert(lambda, phi);
        Ok([lambda * DEGREES, phi * DEGREES])
    }

    /// Wrap `sink` in the full projection chain. Pass `&mut sink` to keep
    /// ownership of the consumer.
    pub fn stream<S: GeoStream>(&self, sink: S) -> ProjectionStream<S> {
        let stages = self.stages();
        let postclip = match stages.postclip {
            Some(extent) => PostClipStream::Rectangle(ClipRectangle::new(extent, sink)),
            None => PostClipStream::Identity(sink),
        };
        let resample = Resample::new(stages.project.clone(), stages.delta2, postclip);
        let preclip = match stages.preclip {
            Some(circle) => PreClipStream::Circle(Clip::new(circle, resample)),
            None => PreClipStream::Antimeridian(clip_antimeridian(resample)),
        };
        ProjectionStream {
            inner: RotateStream {
                rotation: stages.rotation,
                sink: preclip,
            },
        }
    }

    fn stages(&self) -> &Stages {
        self.stages.get_or_init(|| {
            tracing::trace!(
                scale = self.k,
                clip_angle = ?self.clip_angle(),
                clip_extent = ?self.extent,
                delta2 = self.delta2,
                "building projection stages"
            );
            Stages {
                rotation: self.rotation,
                preclip: self.theta.map(CircleClip::new),
                project: ProjectTransform {
                    raw: Arc::clone(&self.raw),
                    transform: self.transform,
                },
                delta2: self.delta2,
                postclip: self.extent,
            }
        })
    }

    /// Re-solve the affine so that the center lands on the translate point.
    fn recenter(&mut self) -> &mut Self {
        let (cx, cy) = self.raw.forward(self.lambda, self.phi);
        let (cx, cy) =
            Affine::scale_translate_rotate(self.k, 0.0, 0.0, self.sx, self.sy, self.alpha)
                .forward(cx, cy);
        self.transform = Affine::scale_translate_rotate(
            self.k,
            self.x - cx,
            self.y - cy,
            self.sx,
            self.sy,
            self.alpha,
        );
        self.rotation = Rotation::new(self.delta_lambda, self.delta_phi, self.delta_gamma);
        self.reset()
    }

    fn reset(&mut self) -> &mut Self {
        self.stages = OnceLock::new();
        self
    }
}

/// Converts degrees to radians and applies the sphere rotation.
pub struct RotateStream<S> {
    rotation: Rotation,
    sink: S,
}

impl<S: GeoStream> GeoStream for RotateStream<S> {
    fn point(&mut self, x: f64, y: f64) {
        let [lambda, phi] = self.rotation.forward(x * RADIANS, y * RADIANS);
        self.sink.point(lambda, phi);
    }

    fn line_start(&mut self) {
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.sink.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.sink.polygon_end();
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}

/// Clipping on the sphere, before projection.
pub enum PreClipStream<S> {
    Antimeridian(Clip<Antimeridian, S>),
    Circle(Clip<CircleClip, S>),
}

impl<S: GeoStream> PreClipStream<S> {
    fn active(&mut self) -> &mut dyn GeoStream {
        match self {
            PreClipStream::Antimeridian(clip) => clip,
            PreClipStream::Circle(clip) => clip,
        }
    }

    fn get_ref(&self) -> &S {
        match self {
            PreClipStream::Antimeridian(clip) => clip.get_ref(),
            PreClipStream::Circle(clip) => clip.get_ref(),
        }
    }

    fn into_inner(self) -> S {
        match self {
            PreClipStream::Antimeridian(clip) => clip.into_inner(),
            PreClipStream::Circle(clip) => clip.into_inner(),
        }
    }
}

/// Clipping on the plane, after projection.
pub enum PostClipStream<S> {
    Identity(S),
    Rectangle(ClipRectangle<S>),
}

impl<S: GeoStream> PostClipStream<S> {
    fn active(&mut self) -> &mut dyn GeoStream {
        match self {
            PostClipStream::Identity(sink) => sink,
            PostClipStream::Rectangle(clip) => clip,
        }
    }

    fn get_ref(&self) -> &S {
        match self {
            PostClipStream::Identity(sink) => sink,
            PostClipStream::Rectangle(clip) => clip.get_ref(),
        }
    }

    fn into_inner(self) -> S {
        match self {
            PostClipStream::Identity(sink) => sink,
            PostClipStream::Rectangle(clip) => clip.into_inner(),
        }
    }
}

macro_rules! forward_to_active {
    ($ty:ident) => {
        impl<S: GeoStream> GeoStream for $ty<S> {
            fn point(&mut self, x: f64, y: f64) {
                self.active().point(x, y);
            }

            fn crossing(&mut self, x: f64, y: f64) {
                self.active().crossing(x, y);
            }

            fn line_start(&mut self) {
                self.active().line_start();
            }

            fn line_end(&mut self) {
                self.active().line_end();
            }

            fn polygon_start(&mut self) {
                self.active().polygon_start();
            }

            fn polygon_end(&mut self) {
                self.active().polygon_end();
            }

            fn sphere(&mut self) {
                self.active().sphere();
            }
        }
    };
}

forward_to_active!(PreClipStream);
forward_to_active!(PostClipStream);

type Chain<S> = RotateStream<PreClipStream<Resample<ProjectTransform, PostClipStream<S>>>>;

/// A [`GeoStream`] accepting `[longitude, latitude]` degrees and writing
/// projected, clipped screen coordinates to the wrapped sink.
pub struct ProjectionStream<S> {
    inner: Chain<S>,
}

impl<S: GeoStream> ProjectionStream<S> {
    pub fn get_ref(&self) -> &S {
        self.inner.sink.get_ref().get_ref().get_ref()
    }

    pub fn into_inner(self) -> S {
        self.inner.sink.into_inner().into_inner().into_inner()
    }
}

impl<S: GeoStream> GeoStream for ProjectionStream<S> {
    fn point(&mut self, x: f64, y: f64) {
        self.inner.point(x, y);
    }

    fn line_start(&mut self) {
        self.inner.line_start();
    }

    fn line_end(&mut self) {
        self.inner.line_end();
    }

    fn polygon_start(&mut self) {
        self.inner.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.inner.polygon_end();
    }

    fn sphere(&mut self) {
        self.inner.sphere();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::GeoJson;
    use crate::proj::{Equirectangular, Mercator, Orthographic, Sinusoidal, Stereographic};
    use crate::stream::recorder::{Event, Recorder};
    use crate::stream::stream;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[derive(Debug)]
    struct ForwardOnly;

    impl RawProjection for ForwardOnly {
        fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
            (lambda, phi.sin())
        }
    }

    #[test]
    fn test_defaults() {
        let p = Projection::new(Equirectangular);
        assert_eq!(p.scale(), 150.0);
        assert_eq!(p.translate(), [480.0, 250.0]);
        assert_eq!(p.center(), [0.0, 0.0]);
        assert_eq!(p.rotate(), [0.0, 0.0, 0.0]);
        assert_eq!(p.clip_angle(), None);
        assert_eq!(p.clip_extent(), None);
        assert_relative_eq!(p.precision(), 0.5_f64.sqrt());
    }

    #[test]
    fn test_default_equirectangular() {
        let p = Projection::new(Equirectangular);
        let [x, y] = p.project([0.0, 0.0]);
        assert_relative_eq!(x, 480.0);
        assert_relative_eq!(y, 250.0);
        // Screen y grows southwards.
        let [x, y] = p.project([90.0, 45.0]);
        assert_relative_eq!(x, 480.0 + 150.0 * PI / 2.0, epsilon = 1e-9);
        assert_relative_eq!(y, 250.0 - 150.0 * PI / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_center_maps_to_translate() {
        let mut p = Projection::new(Equirectangular);
        p.set_center([12.5, -33.0])
            .set_translate([100.0, 200.0])
            .set_scale(321.0);
        let [x, y] = p.project([12.5, -33.0]);
        assert_relative_eq!(x, 100.0, epsilon = 1e-12);
        assert_relative_eq!(y, 200.0, epsilon = 1e-12);
    }

    #[test]
    fn test_center_is_in_rotated_frame() {
        let mut p = Projection::new(Equirectangular);
        p.set_rotate(&[30.0, 0.0]).set_center([10.0, 10.0]);
        // Rotating by 30° of longitude carries (-20°, 10°) onto the center.
        let [x, y] = p.project([-20.0, 10.0]);
        assert_relative_eq!(x, 480.0, epsilon = 1e-9);
        assert_relative_eq!(y, 250.0, epsilon = 1e-9);
        // The unrotated center lands 30° east of the translate point.
        let [x, y] = p.project([10.0, 10.0]);
        assert_relative_eq!(x, 480.0 + 150.0 * PI / 6.0, epsilon = 1e-9);
        assert_relative_eq!(y, 250.0, epsilon = 1e-9);
        let [lon, lat] = p.invert([480.0, 250.0]).unwrap();
        assert_relative_eq!(lon, -20.0, epsilon = 1e-9);
        assert_relative_eq!(lat, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_center_with_angle_and_reflection() {
        let mut p = Projection::new(Mercator);
        p.set_center([30.0, 40.0])
            .set_angle(25.0)
            .set_reflect_x(true)
            .set_reflect_y(true);
        let [x, y] = p.project([30.0, 40.0]);
        assert_relative_eq!(x, 480.0, epsilon = 1e-9);
        assert_relative_eq!(y, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angles_reduced_modulo_360() {
        let mut p = Projection::new(Equirectangular);
        p.set_rotate(&[370.0, -400.0]).set_angle(725.0);
        let [l, f, g] = p.rotate();
        assert_relative_eq!(l, 10.0, epsilon = 1e-9);
        assert_relative_eq!(f, -40.0, epsilon = 1e-9);
        assert_eq!(g, 0.0);
        assert_relative_eq!(p.angle(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip_every_raw() {
        let raws: Vec<Arc<dyn RawProjection>> = vec![
            Arc::new(Equirectangular),
            Arc::new(Mercator),
            Arc::new(Orthographic),
            Arc::new(Stereographic),
            Arc::new(Sinusoidal),
        ];
        let points: &[[f64; 2]] = &[[0.0, 0.0], [10.0, 20.0], [-30.0, -15.0], [45.0, 50.0]];
        for raw in raws {
            let mut p = Projection::from_raw(raw);
            p.set_rotate(&[-10.0, -5.0, 3.0])
                .set_center([2.0, 4.0])
                .set_angle(15.0)
                .set_reflect_x(true);
            for &point in points {
                let back = p.invert(p.project(point)).unwrap();
                assert_relative_eq!(back[0], point[0], epsilon = 1e-6);
                assert_relative_eq!(back[1], point[1], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_invert_without_raw_inverse() {
        let p = Projection::new(ForwardOnly);
        let projected = p.project([10.0, 10.0]);
        assert_eq!(p.invert(projected), Err(ProjError::NoInverse));
    }

    #[test]
    fn test_invert_zero_scale() {
        let mut p = Projection::new(Equirectangular);
        p.set_scale(0.0);
        assert!(matches!(
            p.invert([0.0, 0.0]),
            Err(ProjError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_setters_invalidate_stages() {
        let mut p = Projection::new(Equirectangular);
        let first = p.stream(Recorder::default());
        drop(first);
        assert!(p.stages.get().is_some());

        p.set_scale(10.0);
        assert!(p.stages.get().is_none());

        let mut s = p.stream(Recorder::default());
        s.point(1.0, 0.0);
        let points = s.into_inner().points();
        assert_relative_eq!(points[0][0], 480.0 + 10.0 * RADIANS);

        p.stream(Recorder::default());
        p.set_clip_extent(Some([[0.0, 0.0], [1.0, 1.0]]));
        assert!(p.stages.get().is_none());
    }

    #[test]
    fn test_clip_angle_drops_far_side() {
        let mut p = Projection::new(Orthographic);
        p.set_clip_angle(Some(90.0));
        let mut sink = Recorder::default();
        let mut s = p.stream(&mut sink);
        s.point(10.0, 10.0);
        s.point(170.0, 10.0);
        drop(s);
        assert_eq!(sink.points().len(), 1);
    }

    #[test]
    fn test_clip_extent_bounds_output() {
        let mut p = Projection::new(Equirectangular);
        let extent = [[400.0, 200.0], [560.0, 300.0]];
        p.set_clip_extent(Some(extent));
        let line = GeoJson::line_string(&[[-90.0, 0.0], [90.0, 0.0]]);
        let mut s = p.stream(Recorder::default());
        stream(&line, &mut s);
        let rec = s.into_inner();
        let lines = rec.lines();
        assert_eq!(lines.len(), 1);
        let first = lines[0][0];
        let last = lines[0][lines[0].len() - 1];
        assert_relative_eq!(first[0], 400.0, epsilon = 1e-9);
        assert_relative_eq!(last[0], 560.0, epsilon = 1e-9);
        for p in &lines[0] {
            assert!(p[0] >= 400.0 - 1e-9 && p[0] <= 560.0 + 1e-9);
        }
    }

    #[test]
    fn test_sphere_through_pipeline() {
        let p = Projection::new(Equirectangular);
        let mut s = p.stream(Recorder::default());
        stream(&GeoJson::Sphere, &mut s);
        let rec = s.into_inner();
        assert_eq!(rec.count(&Event::PolygonStart), 1);
        assert_eq!(rec.count(&Event::PolygonEnd), 1);
        for [x, y] in rec.points() {
            assert!(x >= 480.0 - 150.0 * PI - 1e-6 && x <= 480.0 + 150.0 * PI + 1e-6);
            assert!(y >= 250.0 - 75.0 * PI - 1e-6 && y <= 250.0 + 75.0 * PI + 1e-6);
        }
    }

    #[test]
    fn test_projection_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Projection>();
    }
}
