//! Clipping stream transformers.
//!
//! Spherical clippers ([`antimeridian`] and [`circle`]) share one generic
//! [`Clip`] driver parameterised by a [`ClipStrategy`]: points are filtered by
//! visibility, lines are split by the strategy's line clipper, and polygon
//! rings are buffered and stitched back together along the clip boundary by
//! [`rejoin`]. The planar [`rectangle`] clipper reuses the buffer and rejoin
//! machinery with its own line state.

pub mod antimeridian;
pub mod buffer;
pub mod circle;
pub mod line;
pub mod rectangle;
pub mod rejoin;

use std::cmp::Ordering;

use crate::math::{EPSILON, HALF_PI};
use crate::polygon_contains::polygon_contains;
use crate::stream::GeoStream;

pub use antimeridian::{clip_antimeridian, Antimeridian};
pub use buffer::ClipBuffer;
pub use circle::{clip_circle, CircleClip};
pub use rectangle::ClipRectangle;

/// A point recorded by the clip buffer. `crossing` marks points where a
/// clipped line met the clip boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPoint {
    pub point: [f64; 2],
    pub crossing: bool,
}

/// What a line clipper observed while clipping one ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RingCrossings {
    /// The ring met the clip boundary at least once.
    pub has_intersections: bool,
    /// The first point of the ring was visible.
    pub starts_visible: bool,
    /// The last point of the ring was visible.
    pub ends_visible: bool,
}

/// Per-line clipping state machine. A fresh value is created for every clip
/// stream; the sink is passed in on each call so the same state type can
/// feed either the final sink or a ring buffer.
pub trait ClipLine {
    fn line_start<S: GeoStream + ?Sized>(&mut self, sink: &mut S);
    fn point<S: GeoStream + ?Sized>(&mut self, sink: &mut S, lambda: f64, phi: f64);
    fn line_end<S: GeoStream + ?Sized>(&mut self, sink: &mut S);
    fn crossings(&self) -> RingCrossings;
}

/// The region-specific parts of a spherical clipper.
pub trait ClipStrategy {
    type Line: ClipLine;

    fn visible(&self, lambda: f64, phi: f64) -> bool;

    fn line(&self) -> Self::Line;

    /// Walk the clip boundary from `span.0` to `span.1`, or all the way round
    /// when `span` is `None`.
    fn interpolate<S: GeoStream + ?Sized>(
        &self,
        span: Option<([f64; 2], [f64; 2])>,
        direction: f64,
        sink: &mut S,
    );

    /// A point known to be on the clip boundary, used to decide whether the
    /// region outside every ring is inside the clipped polygon.
    fn start(&self) -> [f64; 2];
}

/// Order of intersections along the boundary shared by the antimeridian and
/// circle clippers.
pub fn compare_intersection(a: &[f64; 2], b: &[f64; 2]) -> Ordering {
    fn key(p: &[f64; 2]) -> f64 {
        if p[0] < 0.0 {
            p[1] - HALF_PI - EPSILON
        } else {
            HALF_PI - p[1]
        }
    }
    key(a).total_cmp(&key(b))
}

#[derive(Default)]
struct PolygonState {
    segments: Vec<Vec<ClipPoint>>,
    rings: Vec<Vec<[f64; 2]>>,
    ring: Vec<[f64; 2]>,
}

enum Mode {
    Points,
    Line,
    Polygon(PolygonState),
}

/// Generic spherical clip stream.
pub struct Clip<C: ClipStrategy, S> {
    strategy: C,
    sink: S,
    line: C::Line,
    ring_line: C::Line,
    ring_buffer: ClipBuffer,
    mode: Mode,
    polygon_started: bool,
}

impl<C: ClipStrategy, S: GeoStream> Clip<C, S> {
    pub fn new(strategy: C, sink: S) -> Self {
        let line = strategy.line();
        let ring_line = strategy.line();
        Self {
            strategy,
            sink,
            line,
            ring_line,
            ring_buffer: ClipBuffer::default(),
            mode: Mode::Points,
            polygon_started: false,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn ring_point(&mut self, lambda: f64, phi: f64) {
        if let Mode::Polygon(state) = &mut self.mode {
            state.ring.push([lambda, phi]);
        }
        self.ring_line.point(&mut self.ring_buffer, lambda, phi);
    }

    fn ring_end(&mut self) {
        let Mode::Polygon(state) = &mut self.mode else {
            return;
        };
        let ring = std::mem::take(&mut state.ring);
        if let Some(&first) = ring.first() {
            self.ring_line.point(&mut self.ring_buffer, first[0], first[1]);
        }
        self.ring_line.line_end(&mut self.ring_buffer);

        let crossings = self.ring_line.crossings();
        let mut ring_segments = self.ring_buffer.take();
        if ring.is_empty() {
            return;
        }
        state.rings.push(ring);

        if ring_segments.is_empty() {
            return;
        }

        if !crossings.has_intersections {
            let segment = &ring_segments[0];
            let m = segment.len().saturating_sub(1);
            if m > 0 {
                if !self.polygon_started {
                    self.sink.polygon_start();
                    self.polygon_started = true;
                }
                self.sink.line_start();
                for p in &segment[..m] {
                    self.sink.point(p.point[0], p.point[1]);
                }
                self.sink.line_end();
            }
            return;
        }

        // Rejoin the last segment with the first when the ring starts and
        // ends inside the clip region.
        if ring_segments.len() > 1 && crossings.starts_visible && crossings.ends_visible {
            let first = ring_segments.remove(0);
            if let Some(last) = ring_segments.last_mut() {
                last.extend(first);
            }
        }

        state
            .segments
            .extend(ring_segments.into_iter().filter(|segment| segment.len() > 1));
    }
}

impl<C: ClipStrategy, S: GeoStream> GeoStream for Clip<C, S> {
    fn point(&mut self, lambda: f64, phi: f64) {
        match self.mode {
            Mode::Points => {
                if self.strategy.visible(lambda, phi) {
                    self.sink.point(lambda, phi);
                }
            }
            Mode::Line => self.line.point(&mut self.sink, lambda, phi),
            Mode::Polygon(_) => self.ring_point(lambda, phi),
        }
    }

    fn line_start(&mut self) {
        match &mut self.mode {
            Mode::Polygon(state) => {
                self.ring_line.line_start(&mut self.ring_buffer);
                state.ring.clear();
            }
            mode => {
                *mode = Mode::Line;
                self.line.line_start(&mut self.sink);
            }
        }
    }

    fn line_end(&mut self) {
        match self.mode {
            Mode::Polygon(_) => self.ring_end(),
            _ => {
                self.mode = Mode::Points;
                self.line.line_end(&mut self.sink);
            }
        }
    }

    fn polygon_start(&mut self) {
        self.mode = Mode::Polygon(PolygonState::default());
    }

    fn polygon_end(&mut self) {
        let Mode::Polygon(state) = std::mem::replace(&mut self.mode, Mode::Points) else {
            return;
        };
        let strategy = &self.strategy;
        let start_inside = polygon_contains(&state.rings, strategy.start());
        if !state.segments.is_empty() {
            if !self.polygon_started {
                self.sink.polygon_start();
                self.polygon_started = true;
            }
            tracing::trace!(segments = state.segments.len(), "rejoining clipped polygon");
            rejoin::rejoin(
                state.segments,
                compare_intersection,
                start_inside,
                |from, to, direction, sink: &mut S| {
                    strategy.interpolate(Some((from, to)), direction, sink)
                },
                &mut self.sink,
            );
        } else if start_inside {
            if !self.polygon_started {
                self.sink.polygon_start();
                self.polygon_started = true;
            }
            self.sink.line_start();
            strategy.interpolate(None, 1.0, &mut self.sink);
            self.sink.line_end();
        }
        if self.polygon_started {
            self.sink.polygon_end();
            self.polygon_started = false;
        }
    }

    fn sphere(&mut self) {
        self.sink.polygon_start();
        self.sink.line_start();
        self.strategy.interpolate(None, 1.0, &mut self.sink);
        self.sink.line_end();
        self.sink.polygon_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_intersection_orders_along_boundary() {
        // Western side first going north, then the eastern side going south.
        let mut points = vec![
            [-1.0, 0.5],
            [1.0, -0.5],
            [1.0, 0.5],
            [-1.0, -0.5],
        ];
        points.sort_by(compare_intersection);
        assert_eq!(points, vec![[-1.0, -0.5], [-1.0, 0.5], [1.0, 0.5], [1.0, -0.5]]);
    }
}
