use crate::stream::GeoStream;

/// Planar bounding box of every streamed point.
#[derive(Clone, Copy, Debug)]
pub struct PathBounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Default for PathBounds {
    fn default() -> Self {
        Self {
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        }
    }
}

impl PathBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// `[[x0, y0], [x1, y1]]`; infinite when nothing was streamed.
    pub fn result(&self) -> [[f64; 2]; 2] {
        [[self.x0, self.y0], [self.x1, self.y1]]
    }
}

impl GeoStream for PathBounds {
    fn point(&mut self, x: f64, y: f64) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let mut b = PathBounds::new();
        b.line_start();
        b.point(3.0, -1.0);
        b.point(-2.0, 5.0);
        b.line_end();
        b.point(0.0, 7.0);
        assert_eq!(b.result(), [[-2.0, -1.0], [3.0, 7.0]]);
    }

    #[test]
    fn test_empty_is_infinite() {
        let [[x0, y0], [x1, y1]] = PathBounds::new().result();
        assert!(x0.is_infinite() && y0 > 0.0);
        assert!(x1.is_infinite() && y1 < 0.0);
    }
}
