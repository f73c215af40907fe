//! Adaptive resampling of projected lines.
//!
//! Instead of projecting only the input vertices, the resampler bisects each
//! great-arc segment on the sphere and projects the midpoint, recursing while
//! the projected midpoint strays from the straight chord by more than the
//! tolerance √δ², sits far from the chord's centre, or the arc is longer than
//! 30°. Recursion is capped at a fixed depth so pathological projections
//! still terminate.

use crate::cartesian::{cartesian, Vec3};
use crate::math::{asin, EPSILON};
use crate::stream::GeoStream;

/// Maximum number of bisections per input segment.
pub const MAX_DEPTH: u32 = 16;

/// cos(30°): arcs subtending more than this are always split.
const COS_MIN_DISTANCE: f64 = 0.866_025_403_784_438_6;

/// Maps spherical `[λ, φ]` in radians to planar coordinates.
pub trait PointProjector {
    fn project(&self, lambda: f64, phi: f64) -> [f64; 2];
}

impl<F: Fn(f64, f64) -> [f64; 2]> PointProjector for F {
    fn project(&self, lambda: f64, phi: f64) -> [f64; 2] {
        self(lambda, phi)
    }
}

/// A projected vertex with its spherical origin.
#[derive(Clone, Copy, Debug)]
struct Sample {
    x: f64,
    y: f64,
    lambda: f64,
    v: Vec3,
}

struct LineState {
    ring: bool,
    first: Option<Sample>,
    previous: Option<Sample>,
}

/// Stream transformer projecting every point and densifying lines.
pub struct Resample<P, S> {
    project: P,
    delta2: f64,
    sink: S,
    in_polygon: bool,
    line: Option<LineState>,
}

impl<P: PointProjector, S: GeoStream> Resample<P, S> {
    /// `delta2` is the squared tolerance in output units; zero disables
    /// subdivision so each input point is projected exactly once.
    pub fn new(project: P, delta2: f64, sink: S) -> Self {
        Self {
            project,
            delta2,
            sink,
            in_polygon: false,
            line: None,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn sample(&self, lambda: f64, phi: f64) -> Sample {
        let [x, y] = self.project.project(lambda, phi);
        Sample {
            x,
            y,
            lambda,
            v: cartesian([lambda, phi]),
        }
    }

    /// Emit the interior points needed between `s0` and `s1`.
    fn line_to(&mut self, s0: Sample, s1: Sample, depth: u32) {
        let dx = s1.x - s0.x;
        let dy = s1.y - s0.y;
        let d2 = dx * dx + dy * dy;
        if !(d2 > 4.0 * self.delta2 && depth > 0) {
            return;
        }
        let depth = depth - 1;

        let a = s0.v[0] + s1.v[0];
        let b = s0.v[1] + s1.v[1];
        let c = s0.v[2] + s1.v[2];
        let m = (a * a + b * b + c * c).sqrt();
        let c = c / m;
        let phi2 = asin(c);
        let lambda2 = if ((c.abs() - 1.0).abs() < EPSILON) || (s0.lambda - s1.lambda).abs() < EPSILON
        {
            (s0.lambda + s1.lambda) / 2.0
        } else {
            b.atan2(a)
        };
        let [x2, y2] = self.project.project(lambda2, phi2);
        let dx2 = x2 - s0.x;
        let dy2 = y2 - s0.y;
        let dz = dy * dx2 - dx * dy2;

        let too_far = dz * dz / d2 > self.delta2;
        let off_centre = ((dx * dx2 + dy * dy2) / d2 - 0.5).abs() > 0.3;
        let too_long = s0.v[0] * s1.v[0] + s0.v[1] * s1.v[1] + s0.v[2] * s1.v[2] < COS_MIN_DISTANCE;
        if too_far || off_centre || too_long {
            let mid = Sample {
                x: x2,
                y: y2,
                lambda: lambda2,
                v: [a / m, b / m, c],
            };
            self.line_to(s0, mid, depth);
            self.sink.point(x2, y2);
            self.line_to(mid, s1, depth);
        }
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        if self.delta2 == 0.0 {
            let [x, y] = self.project.project(lambda, phi);
            self.sink.point(x, y);
            return;
        }
        let sample = self.sample(lambda, phi);
        let previous = self.line.as_ref().and_then(|line| line.previous);
        if let Some(previous) = previous {
            self.line_to(previous, sample, MAX_DEPTH);
        }
        self.sink.point(sample.x, sample.y);
        if let Some(line) = &mut self.line {
            if line.first.is_none() {
                line.first = Some(sample);
            }
            line.previous = Some(sample);
        }
    }
}

impl<P: PointProjector, S: GeoStream> GeoStream for Resample<P, S> {
    fn point(&mut self, lambda: f64, phi: f64) {
        if self.line.is_some() {
            self.line_point(lambda, phi);
        } else {
            let [x, y] = self.project.project(lambda, phi);
            self.sink.point(x, y);
        }
    }

    fn line_start(&mut self) {
        self.line = Some(LineState {
            ring: self.in_polygon,
            first: None,
            previous: None,
        });
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        if let Some(LineState {
            ring: true,
            first: Some(first),
            previous: Some(previous),
        }) = self.line.take()
        {
            // Close the ring through the resampler too.
            self.line_to(previous, first, MAX_DEPTH);
        }
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.sink.polygon_start();
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.sink.polygon_end();
        self.in_polygon = false;
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}
