//! Graticule generator: meridians and parallels at regular steps.
//!
//! Major lines span the major extent; minor lines span the (usually shorter)
//! minor extent and skip positions already covered by a major line. Meridians
//! are sampled every 90° of latitude and parallels every `precision` degrees
//! of longitude; the projection's resampler fills in the curves.

use crate::geojson::{GeoJson, Position};
use crate::math::EPSILON;

/// `start, start + step, …` while below `stop`. Empty for a non-positive
/// or non-finite step.
fn range(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil();
    if !(step > 0.0) || !n.is_finite() || n <= 0.0 {
        return Vec::new();
    }
    (0..n as usize).map(|i| start + i as f64 * step).collect()
}

/// Meridian at `x` from `y0` to `y1`.
fn meridian(x: f64, y0: f64, y1: f64, dy: f64) -> Vec<[f64; 2]> {
    let mut ys = range(y0, y1 - EPSILON, dy);
    ys.push(y1);
    ys.into_iter().map(|y| [x, y]).collect()
}

/// Parallel at `y` from `x0` to `x1`.
fn parallel(y: f64, x0: f64, x1: f64, dx: f64) -> Vec<[f64; 2]> {
    let mut xs = range(x0, x1 - EPSILON, dx);
    xs.push(x1);
    xs.into_iter().map(|x| [x, y]).collect()
}

fn ordered(extent: [[f64; 2]; 2]) -> [[f64; 2]; 2] {
    let [[x0, y0], [x1, y1]] = extent;
    [[x0.min(x1), y0.min(y1)], [x0.max(x1), y0.max(y1)]]
}

fn to_positions(points: Vec<[f64; 2]>) -> Vec<Position> {
    points.into_iter().map(Position::from).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Graticule {
    major_extent: [[f64; 2]; 2],
    minor_extent: [[f64; 2]; 2],
    major_step: [f64; 2],
    minor_step: [f64; 2],
    precision: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Self {
            major_extent: [[-180.0, -90.0 + EPSILON], [180.0, 90.0 - EPSILON]],
            minor_extent: [[-180.0, -80.0 - EPSILON], [180.0, 80.0 + EPSILON]],
            major_step: [90.0, 360.0],
            minor_step: [10.0, 10.0],
            precision: 2.5,
        }
    }
}

impl Graticule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both the major and minor extent.
    pub fn with_extent(self, extent: [[f64; 2]; 2]) -> Self {
        self.with_major_extent(extent).with_minor_extent(extent)
    }

    pub fn with_major_extent(mut self, extent: [[f64; 2]; 2]) -> Self {
        self.major_extent = ordered(extent);
        self
    }

    pub fn with_minor_extent(mut self, extent: [[f64; 2]; 2]) -> Self {
        self.minor_extent = ordered(extent);
        self
    }

    /// Set both the major and minor step.
    pub fn with_step(self, step: [f64; 2]) -> Self {
        self.with_major_step(step).with_minor_step(step)
    }

    pub fn with_major_step(mut self, step: [f64; 2]) -> Self {
        self.major_step = step;
        self
    }

    pub fn with_minor_step(mut self, step: [f64; 2]) -> Self {
        self.minor_step = step;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn major_extent(&self) -> [[f64; 2]; 2] {
        self.major_extent
    }

    pub fn minor_extent(&self) -> [[f64; 2]; 2] {
        self.minor_extent
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    fn coordinates(&self) -> Vec<Vec<[f64; 2]>> {
        let [[big_x0, big_y0], [big_x1, big_y1]] = self.major_extent;
        let [[x0, y0], [x1, y1]] = self.minor_extent;
        let [big_dx, big_dy] = self.major_step;
        let [dx, dy] = self.minor_step;
        let precision = self.precision;

        let major_meridians = range((big_x0 / big_dx).ceil() * big_dx, big_x1, big_dx)
            .into_iter()
            .map(|x| meridian(x, big_y0, big_y1, 90.0));
        let major_parallels = range((big_y0 / big_dy).ceil() * big_dy, big_y1, big_dy)
            .into_iter()
            .map(|y| parallel(y, big_x0, big_x1, precision));
        let minor_meridians = range((x0 / dx).ceil() * dx, x1, dx)
            .into_iter()
            .filter(|x| (x % big_dx).abs() > EPSILON)
            .map(|x| meridian(x, y0, y1, 90.0));
        let minor_parallels = range((y0 / dy).ceil() * dy, y1, dy)
            .into_iter()
            .filter(|y| (y % big_dy).abs() > EPSILON)
            .map(|y| parallel(y, x0, x1, precision));

        major_meridians
            .chain(major_parallels)
            .chain(minor_meridians)
            .chain(minor_parallels)
            .collect()
    }

    /// Every graticule line as a separate LineString.
    pub fn lines(&self) -> Vec<GeoJson> {
        self.coordinates()
            .into_iter()
            .map(|line| GeoJson::LineString {
                coordinates: to_positions(line),
            })
            .collect()
    }

    /// All graticule lines as one MultiLineString.
    pub fn multi_line(&self) -> GeoJson {
        GeoJson::MultiLineString {
            coordinates: self.coordinates().into_iter().map(to_positions).collect(),
        }
    }

    /// The polygon bounding the major extent.
    pub fn outline(&self) -> GeoJson {
        let [[x0, y0], [x1, y1]] = self.major_extent;
        let precision = self.precision;
        let mut ring = meridian(x0, y0, y1, 90.0);
        ring.extend(parallel(y1, x0, x1, precision).into_iter().skip(1));
        ring.extend(meridian(x1, y0, y1, 90.0).into_iter().rev().skip(1));
        ring.extend(parallel(y0, x0, x1, precision).into_iter().rev().skip(1));
        GeoJson::Polygon {
            coordinates: vec![to_positions(ring)],
        }
    }
}
