use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::math::Point3;
use crate::model::{Surface, VertexKey};

/// A vertex with too few distinct outgoing neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenVertex {
    pub vertex: Point3,
    /// Number of distinct vertices this vertex has a directed edge to.
    pub neighbors: usize,
}

/// Closure verdict for one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureReport {
    pub zone: String,
    /// Distinct vertices checked.
    pub vertex_count: usize,
    /// Every failing vertex, in first-appearance order.
    pub open_vertices: Vec<OpenVertex>,
}

impl ClosureReport {
    /// `true` if every vertex has at least [`CheckClosure::MIN_NEIGHBORS`]
    /// distinct outgoing neighbours.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.open_vertices.is_empty()
    }

    /// First failing vertex, if any.
    #[must_use]
    pub fn first_open(&self) -> Option<&OpenVertex> {
        self.open_vertices.first()
    }
}

/// Checks that a zone's surfaces enclose a solid.
///
/// Each surface contributes directed edges from vertex `i` to vertex
/// `i - 1` (wrapping). A vertex is closed when it points at no fewer than
/// three distinct vertices; vertices are compared by exact coordinates.
pub struct CheckClosure<'a> {
    zone: &'a str,
    surfaces: Vec<&'a Surface>,
}

impl<'a> CheckClosure<'a> {
    /// Minimum distinct outgoing neighbours of a closed corner.
    pub const MIN_NEIGHBORS: usize = 3;

    /// Creates a new `CheckClosure` query over the given surfaces.
    #[must_use]
    pub fn new(zone: &'a str, surfaces: impl IntoIterator<Item = &'a Surface>) -> Self {
        Self {
            zone,
            surfaces: surfaces.into_iter().collect(),
        }
    }

    /// Executes the check, collecting every open vertex.
    #[must_use]
    pub fn execute(&self) -> ClosureReport {
        let mut order: Vec<(VertexKey, Point3)> = Vec::new();
        let mut outgoing: HashMap<VertexKey, HashSet<VertexKey>> = HashMap::new();

        for surface in &self.surfaces {
            let verts = &surface.vertices;
            let n = verts.len();
            for (i, v) in verts.iter().enumerate() {
                let key = VertexKey::new(v);
                let prev = VertexKey::new(&verts[(i + n - 1) % n]);
                outgoing
                    .entry(key)
                    .or_insert_with(|| {
                        order.push((key, *v));
                        HashSet::new()
                    })
                    .insert(prev);
            }
        }

        let open_vertices: Vec<OpenVertex> = order
            .iter()
            .filter_map(|(key, point)| {
                let neighbors = outgoing.get(key).map_or(0, HashSet::len);
                (neighbors < Self::MIN_NEIGHBORS).then_some(OpenVertex {
                    vertex: *point,
                    neighbors,
                })
            })
            .collect();

        if let Some(first) = open_vertices.first() {
            warn!(
                zone = self.zone,
                open = open_vertices.len(),
                vertex = %first.vertex,
                "zone is not closed"
            );
        }

        ClosureReport {
            zone: self.zone.to_owned(),
            vertex_count: order.len(),
            open_vertices,
        }
    }
}
