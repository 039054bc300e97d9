//! 2D geometry primitives
//!
//! Free functions shared by the polygon kernel, the tessellation and the
//! ward generators. All arithmetic is f64; vertices that should be treated
//! as coincident compare within [`EPSILON`].

mod polygon;

pub use polygon::Polygon;

use glam::DVec2;

/// Tolerance for treating two vertices as the same point
pub const EPSILON: f64 = 1e-9;

/// Whether two points are near-coincident
#[inline]
pub fn points_eq(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// 2D cross product of two vectors given by components
#[inline]
pub fn cross(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    x1 * y2 - y1 * x2
}

/// Linear interpolation between two points
#[inline]
pub fn lerp(p1: DVec2, p2: DVec2, ratio: f64) -> DVec2 {
    p1 + (p2 - p1) * ratio
}

/// Intersect two parametric lines `p1 + t1*d1` and `p2 + t2*d2`
///
/// Returns `(t1, t2)`, or `None` for (near-)parallel lines. The branch on a
/// near-zero `d1.x` avoids dividing by a vanishing direction component.
pub fn intersect_lines(p1: DVec2, d1: DVec2, p2: DVec2, d2: DVec2) -> Option<(f64, f64)> {
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let t2 = ((p1.x - p2.x) * d1.y - (p1.y - p2.y) * d1.x) / denom;
    let t1 = if d1.x.abs() < 1e-12 {
        (p2.y + t2 * d2.y - p1.y) / d1.y
    } else {
        (p2.x + t2 * d2.x - p1.x) / d1.x
    };
    Some((t1, t2))
}

/// Distance from point `p` to the segment `a + t*(d)`, `t` clamped to `[0, 1]`
pub fn distance_to_segment(a: DVec2, d: DVec2, p: DVec2) -> f64 {
    let len2 = d.length_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(d) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + d * t)).length()
}

/// Rotate a vector 90 degrees counterclockwise
#[inline]
pub fn rotate90(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Scale a vector to the given length; zero vectors stay zero
pub fn with_length(v: DVec2, length: f64) -> DVec2 {
    let l = v.length();
    if l > 0.0 {
        v * (length / l)
    } else {
        DVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_lines_crossing() {
        // x axis vs y axis meet at origin
        let (t1, t2) = intersect_lines(
            DVec2::new(-1.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, -1.0),
            DVec2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t1 - 1.0).abs() < 1e-12);
        assert!((t2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersect_lines_parallel() {
        let r = intersect_lines(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 2.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn test_intersect_lines_vertical_first() {
        // First line vertical exercises the degenerate-dx branch
        let (t1, t2) = intersect_lines(
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 3.0),
            DVec2::new(1.0, 0.0),
        )
        .unwrap();
        assert!((t1 - 3.0).abs() < 1e-12);
        assert!((t2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = DVec2::new(0.0, 0.0);
        let d = DVec2::new(10.0, 0.0);
        assert!((distance_to_segment(a, d, DVec2::new(5.0, 3.0)) - 3.0).abs() < 1e-12);
        // Beyond the end the distance is to the endpoint
        assert!((distance_to_segment(a, d, DVec2::new(13.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate90() {
        let v = rotate90(DVec2::new(1.0, 0.0));
        assert!(points_eq(v, DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_with_length() {
        let v = with_length(DVec2::new(3.0, 4.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-12);
        assert_eq!(with_length(DVec2::ZERO, 5.0), DVec2::ZERO);
    }
}
