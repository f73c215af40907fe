use crate::adder::Adder;
use crate::stream::GeoStream;

/// Planar area: the absolute shoelace sum of each polygon's rings.
#[derive(Debug, Default)]
pub struct PathArea {
    sum: Adder,
    polygon_sum: Adder,
    in_polygon: bool,
    in_ring: bool,
    first: Option<[f64; 2]>,
    previous: [f64; 2],
}

impl PathArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> f64 {
        self.sum.value() / 2.0
    }

    fn ring_point(&mut self, x: f64, y: f64) {
        if self.first.is_none() {
            self.first = Some([x, y]);
        } else {
            let [x0, y0] = self.previous;
            self.polygon_sum.add(y0 * x - x0 * y);
        }
        self.previous = [x, y];
    }
}

impl GeoStream for PathArea {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_ring {
            self.ring_point(x, y);
        }
    }

    fn line_start(&mut self) {
        self.in_ring = self.in_polygon;
        self.first = None;
    }

    fn line_end(&mut self) {
        if self.in_ring {
            if let Some([x, y]) = self.first {
                self.ring_point(x, y);
            }
            self.in_ring = false;
        }
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.sum.add(self.polygon_sum.value().abs());
        self.polygon_sum = Adder::new();
        self.in_polygon = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(sink: &mut PathArea, points: &[[f64; 2]]) {
        sink.line_start();
        for p in points {
            sink.point(p[0], p[1]);
        }
        sink.line_end();
    }

    #[test]
    fn test_square_either_orientation() {
        let square = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let mut sink = PathArea::new();
        sink.polygon_start();
        ring(&mut sink, &square);
        sink.polygon_end();
        assert_eq!(sink.result(), 100.0);

        let mut reversed = square;
        reversed.reverse();
        let mut sink = PathArea::new();
        sink.polygon_start();
        ring(&mut sink, &reversed);
        sink.polygon_end();
        assert_eq!(sink.result(), 100.0);
    }

    #[test]
    fn test_hole() {
        let mut sink = PathArea::new();
        sink.polygon_start();
        ring(&mut sink, &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
        ring(&mut sink, &[[2.0, 2.0], [2.0, 4.0], [4.0, 4.0], [4.0, 2.0]]);
        sink.polygon_end();
        assert_eq!(sink.result(), 96.0);
    }

    #[test]
    fn test_lines_ignored() {
        let mut sink = PathArea::new();
        ring(&mut sink, &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
        sink.point(3.0, 3.0);
        assert_eq!(sink.result(), 0.0);
    }
}
