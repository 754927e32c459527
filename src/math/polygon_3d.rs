use super::{Point3, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Arithmetic mean of a set of points.
///
/// Returns the origin for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Normalizes `v`, refusing vectors shorter than [`TOLERANCE`].
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` for (near-)zero vectors.
pub fn try_normalize(v: &Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Candidate normal at every vertex of a polygon.
///
/// For vertex `i` the candidate is `cross(v_i, v_{i-1})` normalized, where
/// `v_i = P_i - centroid` and `i - 1` wraps to the last vertex. Collinear
/// configurations give `None` instead of a NaN vector.
#[must_use]
pub fn vertex_normals(points: &[Point3], centroid: &Point3) -> Vec<Option<Vector3>> {
    let n = points.len();
    let arms: Vec<Vector3> = points.iter().map(|p| p - centroid).collect();
    (0..n)
        .map(|i| {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            try_normalize(&arms[i].cross(&arms[prev])).ok()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn centroid_of_square() {
        let pts = vec![
            p(0.0, 0.0, 1.0),
            p(2.0, 0.0, 1.0),
            p(2.0, 2.0, 1.0),
            p(0.0, 2.0, 1.0),
        ];
        let c = centroid(&pts);
        assert_relative_eq!(c, p(1.0, 1.0, 1.0));
    }

    #[test]
    fn centroid_empty_is_origin() {
        assert_relative_eq!(centroid(&[]), Point3::origin());
    }

    #[test]
    fn try_normalize_rejects_zero() {
        assert!(try_normalize(&Vector3::zeros()).is_err());
        let n = try_normalize(&Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(n, Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn ccw_square_normals_point_down() {
        // cross(v_i, v_{i-1}) is the reverse of the right-hand normal.
        let pts = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let c = centroid(&pts);
        let normals = vertex_normals(&pts, &c);
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert_relative_eq!(n.unwrap(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn collinear_normals_are_none() {
        let pts = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        let c = centroid(&pts);
        let normals = vertex_normals(&pts, &c);
        assert!(normals.iter().all(Option::is_none));
    }
}
