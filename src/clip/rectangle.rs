//! Planar clipping to an axis-aligned rectangle, applied after projection.

use std::cmp::Ordering;

use super::line::clip_line;
use super::rejoin::rejoin;
use super::{ClipBuffer, ClipPoint};
use crate::math::EPSILON;
use crate::stream::GeoStream;

/// Coordinates are clamped to this magnitude before segment clipping.
const CLIP_MAX: f64 = 1e9;

/// The rectangle's edges, shared by the visibility test, boundary ordering
/// and boundary interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Edges {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Edges {
    fn visible(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Index of the edge `p` lies on, numbered clockwise from the left edge
    /// when `direction` is positive.
    fn corner(&self, p: [f64; 2], direction: f64) -> i32 {
        let forward = direction > 0.0;
        if (p[0] - self.x0).abs() < EPSILON {
            if forward { 0 } else { 3 }
        } else if (p[0] - self.x1).abs() < EPSILON {
            if forward { 2 } else { 1 }
        } else if (p[1] - self.y0).abs() < EPSILON {
            if forward { 1 } else { 0 }
        } else if forward {
            3
        } else {
            2
        }
    }

    fn compare(&self, a: &[f64; 2], b: &[f64; 2]) -> Ordering {
        let ca = self.corner(*a, 1.0);
        let cb = self.corner(*b, 1.0);
        ca.cmp(&cb).then_with(|| match ca {
            0 => b[1].total_cmp(&a[1]),
            1 => a[0].total_cmp(&b[0]),
            2 => a[1].total_cmp(&b[1]),
            _ => b[0].total_cmp(&a[0]),
        })
    }

    fn interpolate<S: GeoStream + ?Sized>(
        &self,
        span: Option<([f64; 2], [f64; 2])>,
        direction: f64,
        sink: &mut S,
    ) {
        let step = if direction > 0.0 { 1 } else { -1 };
        let (mut a, a1) = match span {
            None => (0, 0),
            Some((from, to)) => {
                let a = self.corner(from, direction);
                let a1 = self.corner(to, direction);
                // Walk the corners unless `to` follows `from` on the same edge.
                let walk =
                    a != a1 || ((self.compare(&from, &to) == Ordering::Less) != (direction > 0.0));
                if !walk {
                    sink.point(to[0], to[1]);
                    return;
                }
                (a, a1)
            }
        };
        loop {
            let x = if a == 0 || a == 3 { self.x0 } else { self.x1 };
            let y = if a > 1 { self.y1 } else { self.y0 };
            sink.point(x, y);
            a = (a + step + 4) % 4;
            if a == a1 {
                break;
            }
        }
    }

    /// Winding number of the polygon around the rectangle's top-left corner.
    fn winding(&self, rings: &[Vec<[f64; 2]>]) -> i32 {
        let mut winding = 0;
        for ring in rings {
            for pair in ring.windows(2) {
                let [a0, a1] = pair[0];
                let [b0, b1] = pair[1];
                if a1 <= self.y1 {
                    if b1 > self.y1 && (b0 - a0) * (self.y1 - a1) > (b1 - a1) * (self.x0 - a0) {
                        winding += 1;
                    }
                } else if b1 <= self.y1 && (b0 - a0) * (self.y1 - a1) < (b1 - a1) * (self.x0 - a0) {
                    winding -= 1;
                }
            }
        }
        winding
    }
}

struct PolygonState {
    segments: Vec<Vec<ClipPoint>>,
    rings: Vec<Vec<[f64; 2]>>,
    clean: bool,
}

/// Rectangle clip stream. Polygons are buffered until `polygon_end` and then
/// rejoined along the rectangle boundary, clockwise from `(x0, y0)`.
pub struct ClipRectangle<S> {
    edges: Edges,
    sink: S,
    buffer: ClipBuffer,
    polygon: Option<PolygonState>,
    in_line: bool,
    /// First point of the current line and its visibility.
    first: Option<([f64; 2], bool)>,
    previous: [f64; 2],
    previous_visible: bool,
}

impl<S: GeoStream> ClipRectangle<S> {
    /// Clip to `[[x0, y0], [x1, y1]]`.
    pub fn new(extent: [[f64; 2]; 2], sink: S) -> Self {
        let [[x0, y0], [x1, y1]] = extent;
        Self {
            edges: Edges { x0, y0, x1, y1 },
            sink,
            buffer: ClipBuffer::default(),
            polygon: None,
            in_line: false,
            first: None,
            previous: [f64::NAN, f64::NAN],
            previous_visible: false,
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

    /// While a polygon is open, output goes to the buffer.
    fn active(&mut self) -> &mut dyn GeoStream {
        if self.polygon.is_some() {
            &mut self.buffer
        } else {
            &mut self.sink
        }
    }

    fn line_point(&mut self, x: f64, y: f64) {
        let v = self.edges.visible(x, y);
        if let Some(polygon) = &mut self.polygon {
            if let Some(ring) = polygon.rings.last_mut() {
                ring.push([x, y]);
            }
        }
        let (mut x, mut y) = (x, y);
        if self.first.is_none() {
            self.first = Some(([x, y], v));
            if v {
                let active = self.active();
                active.line_start();
                active.point(x, y);
            }
        } else if v && self.previous_visible {
            self.active().point(x, y);
        } else {
            let clamp = |c: f64| c.clamp(-CLIP_MAX, CLIP_MAX);
            let a = [clamp(self.previous[0]), clamp(self.previous[1])];
            x = clamp(x);
            y = clamp(y);
            let extent = [[self.edges.x0, self.edges.y0], [self.edges.x1, self.edges.y1]];
            let previous_visible = self.previous_visible;
            match clip_line(a, [x, y], extent) {
                Some((a, b)) => {
                    let active = self.active();
                    if !previous_visible {
                        active.line_start();
                        active.point(a[0], a[1]);
                    }
                    active.point(b[0], b[1]);
                    if !v {
                        active.line_end();
                    }
                    self.mark_dirty();
                }
                None if v => {
                    let active = self.active();
                    active.line_start();
                    active.point(x, y);
                    self.mark_dirty();
                }
                None => {}
            }
        }
        self.previous = [x, y];
        self.previous_visible = v;
    }

    fn mark_dirty(&mut self) {
        if let Some(polygon) = &mut self.polygon {
            polygon.clean = false;
        }
    }
}

impl<S: GeoStream> GeoStream for ClipRectangle<S> {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_line {
            self.line_point(x, y);
        } else if self.edges.visible(x, y) {
            self.active().point(x, y);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        if let Some(polygon) = &mut self.polygon {
            polygon.rings.push(Vec::new());
        }
        self.first = None;
        self.previous_visible = false;
        self.previous = [f64::NAN, f64::NAN];
    }

    fn line_end(&mut self) {
        if self.polygon.is_some() {
            if let Some(([x, y], first_visible)) = self.first {
                self.line_point(x, y);
                if first_visible && self.previous_visible {
                    self.buffer.rejoin();
                }
            }
            let lines = self.buffer.take();
            if let Some(polygon) = &mut self.polygon {
                polygon.segments.extend(lines);
            }
        }
        self.in_line = false;
        if self.previous_visible {
            self.active().line_end();
        }
    }

    fn polygon_start(&mut self) {
        self.polygon = Some(PolygonState {
            segments: Vec::new(),
            rings: Vec::new(),
            clean: true,
        });
    }

    fn polygon_end(&mut self) {
        let Some(polygon) = self.polygon.take() else {
            return;
        };
        let edges = self.edges;
        let start_inside = edges.winding(&polygon.rings) != 0;
        let clean_inside = polygon.clean && start_inside;
        let visible = !polygon.segments.is_empty();
        if clean_inside || visible {
            self.sink.polygon_start();
            if clean_inside {
                self.sink.line_start();
                edges.interpolate(None, 1.0, &mut self.sink);
                self.sink.line_end();
            }
            if visible {
                rejoin(
                    polygon.segments,
                    |a, b| edges.compare(a, b),
                    start_inside,
                    |from, to, direction, sink: &mut S| {
                        edges.interpolate(Some((from, to)), direction, sink)
                    },
                    &mut self.sink,
                );
            }
            self.sink.polygon_end();
        }
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}
