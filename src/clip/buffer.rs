use super::ClipPoint;
use crate::stream::GeoStream;

/// Collects clipped lines so polygon rings can be rejoined once a whole
/// polygon has been seen.
#[derive(Debug, Default)]
pub struct ClipBuffer {
    lines: Vec<Vec<ClipPoint>>,
}

impl ClipBuffer {
    fn push(&mut self, point: [f64; 2], crossing: bool) {
        match self.lines.last_mut() {
            Some(line) => line.push(ClipPoint { point, crossing }),
            None => self.lines.push(vec![ClipPoint { point, crossing }]),
        }
    }

    /// Join the last line onto the first when a ring was split at its start.
    pub fn rejoin(&mut self) {
        if self.lines.len() > 1 {
            let first = self.lines.remove(0);
            if let Some(last) = self.lines.last_mut() {
                last.extend(first);
            }
        }
    }

    /// Drain the buffered lines.
    pub fn take(&mut self) -> Vec<Vec<ClipPoint>> {
        std::mem::take(&mut self.lines)
    }
}

impl GeoStream for ClipBuffer {
    fn point(&mut self, x: f64, y: f64) {
        self.push([x, y], false);
    }

    fn crossing(&mut self, x: f64, y: f64) {
        self.push([x, y], true);
    }

    fn line_start(&mut self) {
        self.lines.push(Vec::new());
    }
}
