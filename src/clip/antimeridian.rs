//! Cutting along the antimeridian.
//!
//! Every point is visible; lines and rings are split where they jump across
//! λ = ±π so that nothing downstream draws a segment across the whole map.

use super::{Clip, ClipLine, ClipStrategy, RingCrossings};
use crate::math::{EPSILON, HALF_PI, PI};
use crate::stream::GeoStream;

#[derive(Clone, Copy, Debug, Default)]
pub struct Antimeridian;

/// Wrap `sink` in an antimeridian cutter.
pub fn clip_antimeridian<S: GeoStream>(sink: S) -> Clip<Antimeridian, S> {
    Clip::new(Antimeridian, sink)
}

#[derive(Debug)]
pub struct AntimeridianLine {
    lambda0: f64,
    phi0: f64,
    sign0: f64,
    clean: bool,
}

impl Default for AntimeridianLine {
    fn default() -> Self {
        Self {
            lambda0: f64::NAN,
            phi0: f64::NAN,
            sign0: f64::NAN,
            clean: true,
        }
    }
}

/// Latitude where the great arc between two points crosses the antimeridian.
fn intersect(lambda0: f64, phi0: f64, lambda1: f64, phi1: f64) -> f64 {
    let sin_lambda0_lambda1 = (lambda0 - lambda1).sin();
    if sin_lambda0_lambda1.abs() > EPSILON {
        let cos_phi0 = phi0.cos();
        let cos_phi1 = phi1.cos();
        ((phi0.sin() * cos_phi1 * lambda1.sin() - phi1.sin() * cos_phi0 * lambda0.sin())
            / (cos_phi0 * cos_phi1 * sin_lambda0_lambda1))
            .atan()
    } else {
        (phi0 + phi1) / 2.0
    }
}

impl ClipLine for AntimeridianLine {
    fn line_start<S: GeoStream + ?Sized>(&mut self, sink: &mut S) {
        sink.line_start();
        self.clean = true;
    }

    fn point<S: GeoStream + ?Sized>(&mut self, sink: &mut S, lambda: f64, phi: f64) {
        let mut lambda1 = lambda;
        let sign1 = if lambda1 > 0.0 { PI } else { -PI };
        let delta = (lambda1 - self.lambda0).abs();

        if (delta - PI).abs() < EPSILON {
            // The segment passes over a pole.
            self.phi0 = if (self.phi0 + phi) / 2.0 > 0.0 {
                HALF_PI
            } else {
                -HALF_PI
            };
            sink.point(self.lambda0, self.phi0);
            sink.point(self.sign0, self.phi0);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0);
            sink.point(lambda1, self.phi0);
            self.clean = false;
        } else if self.sign0 != sign1 && delta >= PI {
            // Nudge endpoints lying on the seam off it.
            if (self.lambda0 - self.sign0).abs() < EPSILON {
                self.lambda0 -= self.sign0 * EPSILON;
            }
            if (lambda1 - sign1).abs() < EPSILON {
                lambda1 -= sign1 * EPSILON;
            }
            self.phi0 = intersect(self.lambda0, self.phi0, lambda1, phi);
            sink.point(self.sign0, self.phi0);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0);
            self.clean = false;
        }
        self.lambda0 = lambda1;
        self.phi0 = phi;
        sink.point(lambda1, phi);
        self.sign0 = sign1;
    }

    fn line_end<S: GeoStream + ?Sized>(&mut self, sink: &mut S) {
        sink.line_end();
        self.lambda0 = f64::NAN;
        self.phi0 = f64::NAN;
    }

    fn crossings(&self) -> RingCrossings {
        RingCrossings {
            has_intersections: !self.clean,
            starts_visible: true,
            ends_visible: true,
        }
    }
}

impl ClipStrategy for Antimeridian {
    type Line = AntimeridianLine;

    fn visible(&self, _lambda: f64, _phi: f64) -> bool {
        true
    }

    fn line(&self) -> AntimeridianLine {
        AntimeridianLine::default()
    }

    fn interpolate<S: GeoStream + ?Sized>(
        &self,
        span: Option<([f64; 2], [f64; 2])>,
        direction: f64,
        sink: &mut S,
    ) {
        match span {
            None => {
                let phi = direction * HALF_PI;
                sink.point(-PI, phi);
                sink.point(0.0, phi);
                sink.point(PI, phi);
                sink.point(PI, 0.0);
                sink.point(PI, -phi);
                sink.point(0.0, -phi);
                sink.point(-PI, -phi);
                sink.point(-PI, 0.0);
                sink.point(-PI, phi);
            }
            Some((from, to)) if (from[0] - to[0]).abs() > EPSILON => {
                let lambda = if from[0] < to[0] { PI } else { -PI };
                let phi = direction * lambda / 2.0;
                sink.point(-lambda, phi);
                sink.point(0.0, phi);
                sink.point(lambda, phi);
            }
            Some((_, to)) => sink.point(to[0], to[1]),
        }
    }

    fn start(&self) -> [f64; 2] {
        [-PI, -HALF_PI]
    }
}
