use crate::stream::GeoStream;

/// Planar centroid with the same priority as the spherical one: polygon
/// area, then line length, then plain point average.
#[derive(Debug, Default)]
pub struct PathCentroid {
    // Σx, Σy, count of vertices.
    x0: f64,
    y0: f64,
    z0: f64,
    // Length-weighted segment midpoints.
    x1: f64,
    y1: f64,
    z1: f64,
    // Area-weighted triangle centroids.
    x2: f64,
    y2: f64,
    z2: f64,
    in_polygon: bool,
    in_line: bool,
    first: Option<[f64; 2]>,
    previous: [f64; 2],
}

impl PathCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    /// `[x, y]`, or NaN when nothing was streamed.
    pub fn result(&self) -> [f64; 2] {
        if self.z2 != 0.0 {
            [self.x2 / self.z2, self.y2 / self.z2]
        } else if self.z1 != 0.0 {
            [self.x1 / self.z1, self.y1 / self.z1]
        } else if self.z0 != 0.0 {
            [self.x0 / self.z0, self.y0 / self.z0]
        } else {
            [f64::NAN, f64::NAN]
        }
    }

    fn vertex(&mut self, x: f64, y: f64) {
        self.x0 += x;
        self.y0 += y;
        self.z0 += 1.0;
    }

    fn line_point(&mut self, x: f64, y: f64) {
        if self.first.is_some() {
            let [x0, y0] = self.previous;
            let z = (x - x0).hypot(y - y0);
            self.x1 += z * (x0 + x) / 2.0;
            self.y1 += z * (y0 + y) / 2.0;
            self.z1 += z;
            if self.in_polygon {
                let z = y0 * x - x0 * y;
                self.x2 += z * (x0 + x);
                self.y2 += z * (y0 + y);
                self.z2 += z * 3.0;
            }
        } else {
            self.first = Some([x, y]);
        }
        self.previous = [x, y];
        self.vertex(x, y);
    }
}

impl GeoStream for PathCentroid {
    fn point(&mut self, x: f64, y: f64) {
        if self.in_line {
            self.line_point(x, y);
        } else {
            self.vertex(x, y);
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
