//! SVG path data.

use crate::path::context::DEFAULT_POINT_RADIUS;
use crate::stream::GeoStream;

/// A [`GeoStream`] that writes SVG path data: `M x,y L x,y … Z` for lines
/// and rings, and a two-arc circle for each bare point.
#[derive(Clone, Debug)]
pub struct PathString {
    buffer: String,
    radius: f64,
    digits: Option<u32>,
    in_polygon: bool,
    line: Option<bool>,
}

impl Default for PathString {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            radius: DEFAULT_POINT_RADIUS,
            digits: None,
            in_polygon: false,
            line: None,
        }
    }
}

impl PathString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Round every coordinate to `digits` decimal places.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    fn round(&self, v: f64) -> f64 {
        match self.digits {
            Some(d) => {
                let k = 10f64.powi(d as i32);
                (v * k).round() / k
            }
            None => v,
        }
    }

    fn command(&mut self, c: char, x: f64, y: f64) {
        let (x, y) = (self.round(x), self.round(y));
        self.buffer.push_str(&format!("{c}{x},{y}"));
    }

    fn circle(&mut self) {
        let r = self.round(self.radius);
        let d = self.round(2.0 * self.radius);
        self.buffer.push_str(&format!(
            "m0,{r}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{d}z",
            -d
        ));
    }
}

impl GeoStream for PathString {
    fn point(&mut self, x: f64, y: f64) {
        match self.line {
            Some(false) => {
                self.command('M', x, y);
                self.line = Some(true);
            }
            Some(true) => self.command('L', x, y),
            None => {
                self.command('M', x, y);
                self.circle();
            }
        }
    }

    fn line_start(&mut self) {
        self.line = Some(false);
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            self.buffer.push('Z');
        }
        self.line = None;
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
    fn test_polygon() {
        let mut s = PathString::new();
        s.polygon_start();
        s.line_start();
        s.point(0.0, 0.0);
        s.point(10.0, 0.0);
        s.point(10.0, 10.0);
        s.line_end();
        s.polygon_end();
        assert_eq!(s.finish(), "M0,0L10,0L10,10Z");
    }

    #[test]
    fn test_point() {
        let mut s = PathString::new();
        s.point(480.0, 250.0);
        assert_eq!(
            s.as_str(),
            "M480,250m0,4.5a4.5,4.5 0 1,1 0,-9a4.5,4.5 0 1,1 0,9z"
        );
    }

    #[test]
    fn test_digits() {
        let mut s = PathString::new().with_digits(2);
        s.line_start();
        s.point(1.23456, -7.891);
        s.point(2.0, 3.006);
        s.line_end();
        assert_eq!(s.finish(), "M1.23,-7.89L2,3.01");
    }
}
