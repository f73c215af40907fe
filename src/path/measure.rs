use crate::adder::Adder;
use crate::stream::GeoStream;

/// Planar length of lines and polygon perimeters, rings closed.
#[derive(Debug, Default)]
pub struct PathMeasure {
    sum: Adder,
    in_polygon: bool,
    in_line: bool,
    first: Option<[f64; 2]>,
    previous: [f64; 2],
}

impl PathMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> f64 {
        self.sum.value()
    }

    fn line_point(&mut self, x: f64, y: f64) {
        if self.first.is_none() {
            self.first = Some([x, y]);
        } else {
            let [x0, y0] = self.previous;
            self.sum.add((x - x0).hypot(y - y0));
        }
        self.previous = [x, y];
    }
}

impl GeoStream for PathMeasure {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_line {
            self.line_point(x, y);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        self.first = None;
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            if let Some([x, y]) = self.first {
                self.line_point(x, y);
            }
        }
        self.in_line = false;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_ring() {
        let mut m = PathMeasure::new();
        m.line_start();
        m.point(0.0, 0.0);
        m.point(3.0, 4.0);
        m.line_end();
        assert_eq!(m.result(), 5.0);

        m.polygon_start();
        m.line_start();
        m.point(0.0, 0.0);
        m.point(10.0, 0.0);
        m.point(10.0, 10.0);
        m.point(0.0, 10.0);
        m.line_end();
        m.polygon_end();
        assert_eq!(m.result(), 45.0);
    }

    #[test]
    fn test_points_ignored() {
        let mut m = PathMeasure::new();
        m.point(1.0, 1.0);
        m.point(5.0, 5.0);
        assert_eq!(m.result(), 0.0);
    }
}
