use super::{Point2, Point3, TOLERANCE};

/// Cyclic direction of a polygon's vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    /// Zero area within tolerance: the loop has no usable direction.
    Degenerate,
}

/// Computes the signed area of a 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Classifies the winding of a 2D polygon.
///
/// The area is compared against the magnitude of the shoelace terms, so
/// rounding noise on large coordinates is still reported as degenerate.
#[must_use]
pub fn winding(points: &[Point2]) -> Winding {
    let n = points.len();
    if n < 3 {
        return Winding::Degenerate;
    }
    let mut scale = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        scale += (points[i].x * points[j].y).abs() + (points[j].x * points[i].y).abs();
    }
    let area = signed_area(points);
    if area.abs() <= TOLERANCE * scale.max(1.0) {
        Winding::Degenerate
    } else if area > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    }
}

/// Even-odd test of `point` against a single closed ring.
///
/// Points exactly on an edge may land on either side.
#[must_use]
pub fn contains_point(ring: &[Point2], point: &Point2) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + n - 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Signed area of a 3D polygon projected onto the XY plane.
#[must_use]
pub fn signed_area_xy(points: &[Point3]) -> f64 {
    let flat: Vec<Point2> = points.iter().map(|p| Point2::new(p.x, p.y)).collect();
    signed_area(&flat)
}

/// Returns `true` if `value` is at most zero, allowing [`TOLERANCE`] slack.
#[inline]
#[must_use]
pub fn non_positive(value: f64) -> bool {
    value <= TOLERANCE
}

/// Returns `true` if `value` is at least zero, allowing [`TOLERANCE`] slack.
#[inline]
#[must_use]
pub fn non_negative(value: f64) -> bool {
    value >= -TOLERANCE
}
