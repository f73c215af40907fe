//! Clipping to a small circle of given angular radius around (0°, 0°).

use super::{Clip, ClipLine, ClipStrategy, RingCrossings};
use crate::cartesian::{add, cartesian, cross, dot, scale, spherical};
use crate::circle::circle_stream;
use crate::math::{point_equal, EPSILON, PI, RADIANS};
use crate::stream::GeoStream;

/// Boundary interpolation step.
const STEP: f64 = 2.0 * RADIANS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleClip {
    radius: f64,
    cos_radius: f64,
    small_radius: bool,
    not_hemisphere: bool,
}

/// Wrap `sink` in a clipper keeping everything within `radius` radians of
/// the rotated origin.
pub fn clip_circle<S: GeoStream>(radius: f64, sink: S) -> Clip<CircleClip, S> {
    Clip::new(CircleClip::new(radius), sink)
}

impl CircleClip {
    pub fn new(radius: f64) -> Self {
        let cos_radius = radius.cos();
        Self {
            radius,
            cos_radius,
            small_radius: cos_radius > 0.0,
            not_hemisphere: cos_radius.abs() > EPSILON,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Cohen-Sutherland style outcode against the circle's bounding box.
    fn code(&self, lambda: f64, phi: f64) -> u8 {
        let r = if self.small_radius {
            self.radius
        } else {
            PI - self.radius
        };
        let mut code = 0;
        if lambda < -r {
            code |= 1;
        } else if lambda > r {
            code |= 2;
        }
        if phi < -r {
            code |= 4;
        } else if phi > r {
            code |= 8;
        }
        code
    }

    /// Intersect the great arc through `a` and `b` with the circle, returning
    /// the crossing nearer `a`'s side of the solution line.
    fn intersect(&self, a: [f64; 2], b: [f64; 2]) -> Option<[f64; 2]> {
        match self.solve(a, b)? {
            Solution::Polar => Some(a),
            Solution::Line { a: base, u, w, uu, t } => {
                Some(spherical(add(scale(u, (-w - t) / uu), base)))
            }
        }
    }

    /// Both crossings of the great arc from `a` to `b`, when the first lies
    /// between them.
    fn intersect_two(&self, a: [f64; 2], b: [f64; 2]) -> Option<([f64; 2], [f64; 2])> {
        let Solution::Line { a: base, u, w, uu, t } = self.solve(a, b)? else {
            return None;
        };
        let q = spherical(add(scale(u, (-w - t) / uu), base));

        let (mut lambda0, mut lambda1) = (a[0], b[0]);
        let (mut phi0, mut phi1) = (a[1], b[1]);
        if lambda1 < lambda0 {
            std::mem::swap(&mut lambda0, &mut lambda1);
        }
        let delta = lambda1 - lambda0;
        let polar = (delta - PI).abs() < EPSILON;
        let meridian = polar || delta < EPSILON;
        if !polar && phi1 < phi0 {
            std::mem::swap(&mut phi0, &mut phi1);
        }

        let between = if meridian {
            if polar {
                let bound = if (q[0] - lambda0).abs() < EPSILON {
                    phi0
                } else {
                    phi1
                };
                (phi0 + phi1 > 0.0) ^ (q[1] < bound)
            } else {
                phi0 <= q[1] && q[1] <= phi1
            }
        } else {
            (delta > PI) ^ (lambda0 <= q[0] && q[0] <= lambda1)
        };
        if !between {
            return None;
        }
        let q1 = spherical(add(scale(u, (-w + t) / uu), base));
        Some((q, q1))
    }

    /// Intersection of the plane of the great circle through `a` and `b`
    /// with the plane of the clip circle, solved against the unit sphere.
    fn solve(&self, a: [f64; 2], b: [f64; 2]) -> Option<Solution> {
        let pa = cartesian(a);
        let pb = cartesian(b);
        let n1 = [1.0, 0.0, 0.0];
        let n2 = cross(pa, pb);
        let n2n2 = dot(n2, n2);
        let n1n2 = n2[0];
        let determinant = n2n2 - n1n2 * n1n2;
        if determinant == 0.0 {
            return Some(Solution::Polar);
        }

        let c1 = self.cos_radius * n2n2 / determinant;
        let c2 = -self.cos_radius * n1n2 / determinant;
        let u = cross(n1, n2);
        let base = add(scale(n1, c1), scale(n2, c2));
        let w = dot(base, u);
        let uu = dot(u, u);
        let t2 = w * w - uu * (dot(base, base) - 1.0);
        if t2 < 0.0 {
            return None;
        }
        Some(Solution::Line {
            a: base,
            u,
            w,
            uu,
            t: t2.sqrt(),
        })
    }
}

enum Solution {
    /// Both points are poles of the clip circle's axis.
    Polar,
    Line {
        a: [f64; 3],
        u: [f64; 3],
        w: f64,
        uu: f64,
        t: f64,
    },
}

#[derive(Debug)]
pub struct CircleLine {
    circle: CircleClip,
    point0: Option<[f64; 2]>,
    c0: u8,
    v0: bool,
    v00: bool,
    clean: bool,
}

impl ClipLine for CircleLine {
    fn line_start<S: GeoStream + ?Sized>(&mut self, _sink: &mut S) {
        self.v00 = false;
        self.v0 = false;
        self.clean = true;
    }

    fn point<S: GeoStream + ?Sized>(&mut self, sink: &mut S, lambda: f64, phi: f64) {
        let circle = self.circle;
        let point1 = [lambda, phi];
        let v = circle.visible(lambda, phi);
        let c = match (circle.small_radius, v) {
            (true, true) => 0,
            (true, false) => circle.code(lambda, phi),
            (false, true) => circle.code(lambda + if lambda < 0.0 { PI } else { -PI }, phi),
            (false, false) => 0,
        };

        if self.point0.is_none() {
            self.v00 = v;
            self.v0 = v;
            if v {
                sink.line_start();
            }
        }

        let previous = self.point0;
        match previous {
            Some(point0) if v != self.v0 => {
                self.clean = false;
                if v {
                    // Entering: the crossing falls back to the first visible
                    // point when the solve degenerates.
                    sink.line_start();
                    let point2 = circle.intersect(point1, point0).unwrap_or(point1);
                    sink.point(point2[0], point2[1]);
                    self.point0 = Some(point2);
                } else {
                    let point2 = circle.intersect(point0, point1).unwrap_or(point0);
                    sink.crossing(point2[0], point2[1]);
                    sink.line_end();
                    self.point0 = Some(point2);
                }
            }
            Some(point0) if circle.not_hemisphere && (circle.small_radius ^ v) => {
                // Both endpoints on the same side, but the arc may still dip
                // through the circle.
                if c & self.c0 == 0 {
                    if let Some((t0, t1)) = circle.intersect_two(point1, point0) {
                        self.clean = false;
                        if circle.small_radius {
                            sink.line_start();
                            sink.point(t0[0], t0[1]);
                            sink.point(t1[0], t1[1]);
                            sink.line_end();
                        } else {
                            sink.point(t1[0], t1[1]);
                            sink.line_end();
                            sink.line_start();
                            sink.crossing(t0[0], t0[1]);
                        }
                    }
                }
            }
            _ => {}
        }

        if v && self.point0.map_or(true, |p0| !point_equal(p0, point1)) {
            sink.point(point1[0], point1[1]);
        }
        self.point0 = Some(point1);
        self.v0 = v;
        self.c0 = c;
    }

    fn line_end<S: GeoStream + ?Sized>(&mut self, sink: &mut S) {
        if self.v0 {
            sink.line_end();
        }
        self.point0 = None;
    }

    fn crossings(&self) -> RingCrossings {
        RingCrossings {
            has_intersections: !self.clean,
            starts_visible: self.v00,
            ends_visible: self.v0,
        }
    }
}

impl ClipStrategy for CircleClip {
    type Line = CircleLine;

    fn visible(&self, lambda: f64, phi: f64) -> bool {
        lambda.cos() * phi.cos() > self.cos_radius
    }

    fn line(&self) -> CircleLine {
        CircleLine {
            circle: *self,
            point0: None,
            c0: 0,
            v0: false,
            v00: false,
            clean: true,
        }
    }

    fn interpolate<S: GeoStream + ?Sized>(
        &self,
        span: Option<([f64; 2], [f64; 2])>,
        direction: f64,
        sink: &mut S,
    ) {
        circle_stream(sink, self.radius, STEP, direction, span);
    }

    fn start(&self) -> [f64; 2] {
        if self.small_radius {
            [0.0, -self.radius]
        } else {
            [-PI, self.radius - PI]
        }
    }
}
