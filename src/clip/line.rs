//! Liang-Barsky segment clipping against an axis-aligned rectangle.

/// One half-plane test. `num / den` is the parameter where the segment meets
/// the edge; the entering parameter raises `t0`, the leaving one lowers `t1`.
fn clip_edge(num: f64, den: f64, t0: &mut f64, t1: &mut f64) -> bool {
    if den == 0.0 {
        return num <= 0.0;
    }
    let r = num / den;
    if den < 0.0 {
        if r < *t0 {
            return false;
        }
        if r < *t1 {
            *t1 = r;
        }
    } else {
        if r > *t1 {
            return false;
        }
        if r > *t0 {
            *t0 = r;
        }
    }
    true
}

/// Clip the segment `a`-`b` to `[[x0, y0], [x1, y1]]`, returning the visible
/// part or `None` when the segment misses the rectangle.
pub fn clip_line(a: [f64; 2], b: [f64; 2], extent: [[f64; 2]; 2]) -> Option<([f64; 2], [f64; 2])> {
    let [[x0, y0], [x1, y1]] = extent;
    let (ax, ay) = (a[0], a[1]);
    let dx = b[0] - ax;
    let dy = b[1] - ay;
    let mut t0 = 0.0;
    let mut t1 = 1.0;

    if !(clip_edge(x0 - ax, dx, &mut t0, &mut t1)
        && clip_edge(ax - x1, -dx, &mut t0, &mut t1)
        && clip_edge(y0 - ay, dy, &mut t0, &mut t1)
        && clip_edge(ay - y1, -dy, &mut t0, &mut t1))
    {
        return None;
    }

    let mut a = a;
    let mut b = b;
    if t0 > 0.0 {
        a = [ax + t0 * dx, ay + t0 * dy];
    }
    if t1 < 1.0 {
        b = [ax + t1 * dx, ay + t1 * dy];
    }
    Some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const UNIT: [[f64; 2]; 2] = [[0.0, 0.0], [1.0, 1.0]];

    #[test]
    fn test_inside_unchanged() {
        let (a, b) = clip_line([0.2, 0.2], [0.8, 0.6], UNIT).unwrap();
        assert_eq!(a, [0.2, 0.2]);
        assert_eq!(b, [0.8, 0.6]);
    }

    #[test]
    fn test_crossing_both_edges() {
        let (a, b) = clip_line([-1.0, 0.5], [2.0, 0.5], UNIT).unwrap();
        assert_relative_eq!(a[0], 0.0);
        assert_relative_eq!(b[0], 1.0);
        assert_relative_eq!(a[1], 0.5);
    }

    #[test]
    fn test_diagonal_exit() {
        let (a, b) = clip_line([0.5, 0.5], [1.5, 2.5], UNIT).unwrap();
        assert_eq!(a, [0.5, 0.5]);
        assert_relative_eq!(b[0], 0.75);
        assert_relative_eq!(b[1], 1.0);
    }

    #[test]
    fn test_outside_rejected() {
        assert!(clip_line([2.0, 0.0], [3.0, 1.0], UNIT).is_none());
        assert!(clip_line([-0.5, 0.5], [0.5, 1.5], [[0.0, 0.0], [0.4, 0.4]]).is_none());
        // Parallel to an edge and outside it.
        assert!(clip_line([0.2, 1.5], [0.8, 1.5], UNIT).is_none());
    }
}
