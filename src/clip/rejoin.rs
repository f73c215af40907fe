//! Weiler-Atherton style reconstruction of clipped polygons.
//!
//! Every clipped segment contributes two intersections: its start (an entry
//! into the clip region) and its end (an exit). Each intersection exists
//! twice, once in the subject list (segment order) and once in the clip list
//! (sorted along the clip boundary), and the two copies point at each other.
//! Output rings are traced by alternating between the lists. Records live in
//! a single arena and link to each other by index.

use std::cmp::Ordering;

use super::ClipPoint;
use crate::math::{point_equal, EPSILON};
use crate::stream::GeoStream;

#[derive(Debug)]
struct Intersection {
    point: [f64; 2],
    /// Index of the owning segment; `None` for clip-list records.
    segment: Option<usize>,
    other: usize,
    entry: bool,
    visited: bool,
    next: usize,
    prev: usize,
}

impl Intersection {
    fn new(point: [f64; 2], segment: Option<usize>, entry: bool) -> Self {
        Self {
            point,
            segment,
            other: 0,
            entry,
            visited: false,
            next: 0,
            prev: 0,
        }
    }
}

/// Link `list` into a circular doubly linked list.
fn link(arena: &mut [Intersection], list: &[usize]) {
    let n = list.len();
    for (i, &a) in list.iter().enumerate() {
        let b = list[(i + 1) % n];
        arena[a].next = b;
        arena[b].prev = a;
    }
}

/// Stitch clipped `segments` into closed rings on `sink`.
///
/// `compare` orders points along the clip boundary, `start_inside` tells
/// whether the boundary start point lies inside the polygon, and
/// `interpolate(from, to, direction, sink)` walks the boundary between two
/// intersections.
pub fn rejoin<S, C, I>(
    mut segments: Vec<Vec<ClipPoint>>,
    compare: C,
    mut start_inside: bool,
    mut interpolate: I,
    sink: &mut S,
) where
    S: GeoStream + ?Sized,
    C: Fn(&[f64; 2], &[f64; 2]) -> Ordering,
    I: FnMut([f64; 2], [f64; 2], f64, &mut S),
{
    let mut arena: Vec<Intersection> = Vec::new();
    let mut subject: Vec<usize> = Vec::new();
    let mut clip: Vec<usize> = Vec::new();

    for (index, segment) in segments.iter_mut().enumerate() {
        let n = segment.len().saturating_sub(1);
        if n == 0 {
            continue;
        }
        let p0 = segment[0];
        if point_equal(p0.point, segment[n].point) {
            if !p0.crossing && !segment[n].crossing {
                sink.line_start();
                for p in &segment[..n] {
                    sink.point(p.point[0], p.point[1]);
                }
                sink.line_end();
                continue;
            }
            // Coincident crossing ends: nudge the end so the two
            // intersections sort apart.
            segment[n].point[0] += 2.0 * EPSILON;
        }
        let p1 = segment[n];

        for (point, entry) in [(p0.point, true), (p1.point, false)] {
            let s = arena.len();
            let c = s + 1;
            arena.push(Intersection::new(point, Some(index), entry));
            arena.push(Intersection::new(point, None, !entry));
            arena[s].other = c;
            arena[c].other = s;
            subject.push(s);
            clip.push(c);
        }
    }

    if subject.is_empty() {
        return;
    }

    clip.sort_by(|&a, &b| compare(&arena[a].point, &arena[b].point));
    link(&mut arena, &subject);
    link(&mut arena, &clip);

    for &c in &clip {
        start_inside = !start_inside;
        arena[c].entry = start_inside;
    }

    let start = subject[0];
    loop {
        // Find the first unvisited intersection.
        let mut current = start;
        let mut is_subject = true;
        while arena[current].visited {
            current = arena[current].next;
            if current == start {
                return;
            }
        }
        let mut points = arena[current].segment;
        sink.line_start();
        loop {
            let other = arena[current].other;
            arena[current].visited = true;
            arena[other].visited = true;
            if arena[current].entry {
                let next = arena[current].next;
                if is_subject {
                    if let Some(segment) = points {
                        for p in &segments[segment] {
                            sink.point(p.point[0], p.point[1]);
                        }
                    }
                } else {
                    interpolate(arena[current].point, arena[next].point, 1.0, sink);
                }
                current = next;
            } else {
                let prev = arena[current].prev;
                if is_subject {
                    points = arena[prev].segment;
                    if let Some(segment) = points {
                        for p in segments[segment].iter().rev() {
                            sink.point(p.point[0], p.point[1]);
                        }
                    }
                } else {
                    interpolate(arena[current].point, arena[prev].point, -1.0, sink);
                }
                current = prev;
            }
            current = arena[current].other;
            points = arena[current].segment;
            is_subject = !is_subject;
            if arena[current].visited {
                break;
            }
        }
        sink.line_end();
    }
}
