//! Drawing through a canvas-like context.

use crate::math::TAU;
use crate::stream::GeoStream;

/// The subset of a 2D canvas API needed to draw projected geometry.
pub trait PathContext {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
}

impl<C: PathContext + ?Sized> PathContext for &mut C {
    fn move_to(&mut self, x: f64, y: f64) {
        (**self).move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        (**self).line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        (**self).arc(x, y, radius, start_angle, end_angle);
    }

    fn close_path(&mut self) {
        (**self).close_path();
    }
}

/// Where the next point goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pen {
    Point,
    LineStart,
    LineTo,
}

pub const DEFAULT_POINT_RADIUS: f64 = 4.5;

/// A [`GeoStream`] that draws onto a [`PathContext`]. Lines become
/// `move_to`/`line_to` runs, polygon rings are closed, and bare points are
/// drawn as circles.
#[derive(Debug)]
pub struct ContextStream<C> {
    context: C,
    radius: f64,
    pen: Pen,
    in_polygon: bool,
}

impl<C: PathContext> ContextStream<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            radius: DEFAULT_POINT_RADIUS,
            pen: Pen::Point,
            in_polygon: false,
        }
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn into_inner(self) -> C {
        self.context
    }
}

impl<C: PathContext> GeoStream for ContextStream<C> {
    fn point(&mut self, x: f64, y: f64) {
        match self.pen {
            Pen::LineStart => {
                self.context.move_to(x, y);
                self.pen = Pen::LineTo;
            }
            Pen::LineTo => self.context.line_to(x, y),
            Pen::Point => {
                self.context.move_to(x + self.radius, y);
                self.context.arc(x, y, self.radius, 0.0, TAU);
            }
        }
    }

    fn line_start(&mut self) {
        self.pen = Pen::LineStart;
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            self.context.close_path();
        }
        self.pen = Pen::Point;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}
