use std::cmp::Ordering;
use std::collections::HashMap;

use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::math::polygon_2d::{contains_point, winding, Winding};
use crate::math::{Point2, Point3};

use super::Triangle;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Why a footprint could not be triangulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FootprintError {
    /// spade rejected a point (non-finite or out of range).
    Insert(String),
    /// Two boundary edges cross in the XY projection.
    CrossingEdges { from: usize, to: usize },
}

/// Triangulates a closed polygon after dropping Z.
///
/// The boundary is inserted as constraint edges and only the triangles whose
/// centroid lies inside the ring are returned. Each triangle keeps the original 3D coordinates of its
/// corners. Points and constraints are inserted in coordinate order, so the
/// output does not depend on which vertex the polygon starts at. A footprint
/// without area yields no triangles.
pub(crate) fn triangulate_footprint(polygon: &[Point3]) -> Result<Vec<Triangle>, FootprintError> {
    let flat: Vec<Point2> = polygon.iter().map(|p| Point2::new(p.x, p.y)).collect();
    let finite = flat.iter().all(|q| q.x.is_finite() && q.y.is_finite());
    if finite && winding(&flat) == Winding::Degenerate {
        return Ok(Vec::new());
    }

    let n = polygon.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        polygon[i]
            .x
            .total_cmp(&polygon[j].x)
            .then(polygon[i].y.total_cmp(&polygon[j].y))
    });

    let mut cdt = Cdt::new();
    let mut slots: Vec<Option<FixedVertexHandle>> = vec![None; n];
    let mut lifted: HashMap<usize, Point3> = HashMap::new();
    for i in order {
        let point = polygon[i];
        let handle = cdt
            .insert(SpadePoint2::new(point.x, point.y))
            .map_err(|e: InsertionError| FootprintError::Insert(e.to_string()))?;
        lifted.entry(handle.index()).or_insert(point);
        slots[i] = Some(handle);
    }
    let handles: Vec<FixedVertexHandle> = slots.into_iter().flatten().collect();

    let mut edges: Vec<(FixedVertexHandle, FixedVertexHandle, usize)> = (0..n)
        .filter_map(|i| {
            let (a, b) = (handles[i], handles[(i + 1) % n]);
            match a.index().cmp(&b.index()) {
                Ordering::Less => Some((a, b, i)),
                Ordering::Greater => Some((b, a, i)),
                Ordering::Equal => None,
            }
        })
        .collect();
    edges.sort_by_key(|&(a, b, _)| (a.index(), b.index()));
    edges.dedup_by_key(|&mut (a, b, _)| (a.index(), b.index()));

    for (from, to, i) in edges {
        if !cdt.can_add_constraint(from, to) {
            return Err(FootprintError::CrossingEdges {
                from: i,
                to: (i + 1) % n,
            });
        }
        cdt.add_constraint(from, to);
    }

    // Constraints keep every face on one side of the boundary, so the face
    // centroid decides which side.
    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        let [q0, q1, q2] = face.positions();
        let mid = Point2::new((q0.x + q1.x + q2.x) / 3.0, (q0.y + q1.y + q2.y) / 3.0);
        if !contains_point(&flat, &mid) {
            continue;
        }
        let [a, b, c] = face.vertices().map(|v| lifted[&v.fix().index()]);
        triangles.push(Triangle::new(a, b, c));
    }
    Ok(triangles)
}
