mod triangulate;

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::ZoneError;
use crate::math::polygon_3d::centroid;
use crate::math::Point3;
use crate::model::{Surface, SurfaceType, VertexKey, ZoneContext};

use triangulate::{triangulate_footprint, FootprintError};

/// A triangle of a floor footprint, with full 3D corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3; 3],
}

impl Triangle {
    /// Creates a triangle from three corners.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// The three corners.
    #[must_use]
    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    /// Arithmetic mean of the corners.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        centroid(&self.vertices)
    }

    /// Number of corners that exactly match a vertex in `keys`.
    #[must_use]
    pub fn shared_corners(&self, keys: &HashSet<VertexKey>) -> usize {
        self.vertices
            .iter()
            .filter(|v| keys.contains(&VertexKey::new(v)))
            .count()
    }
}

/// Synthetic address of one floor triangle: `(zone, index)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriangleKey {
    pub zone: String,
    pub index: usize,
}

impl fmt::Display for TriangleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.zone, self.index)
    }
}

/// A point known to lie inside a zone: the centroid of one floor triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteriorPoint {
    /// Position in the zone's triangle list.
    pub index: usize,
    pub triangle: Triangle,
    pub point: Point3,
}

/// All interior reference points of one zone, in triangulation order.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorReference {
    zone: String,
    points: Vec<InteriorPoint>,
}

impl InteriorReference {
    /// Zone the points belong to.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Interior points, one per floor triangle.
    #[must_use]
    pub fn points(&self) -> &[InteriorPoint] {
        &self.points
    }

    /// Number of floor triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a successfully built reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Key of the point at `index`.
    #[must_use]
    pub fn key(&self, index: usize) -> TriangleKey {
        TriangleKey {
            zone: self.zone.clone(),
            index,
        }
    }

    /// Looks a point up by key. Keys of other zones never match.
    #[must_use]
    pub fn get(&self, key: &TriangleKey) -> Option<&InteriorPoint> {
        if key.zone != self.zone {
            return None;
        }
        self.points.get(key.index)
    }

    /// First point whose triangle shares at least two corners with `surface`.
    #[must_use]
    pub fn adjacent_to(&self, surface: &Surface) -> Option<&InteriorPoint> {
        let keys: HashSet<VertexKey> = surface.vertices.iter().map(VertexKey::new).collect();
        self.points
            .iter()
            .find(|ip| ip.triangle.shared_corners(&keys) >= 2)
    }

    /// Reference point used to orient `surface`.
    ///
    /// Prefers an adjacent triangle. Walls, roofs and other surfaces fall back
    /// to the zone's first triangle; floors do not.
    #[must_use]
    pub fn match_surface(&self, surface: &Surface) -> Option<&InteriorPoint> {
        if let Some(ip) = self.adjacent_to(surface) {
            return Some(ip);
        }
        match surface.surface_type {
            SurfaceType::Floor => None,
            SurfaceType::Roof | SurfaceType::Wall | SurfaceType::Other => self.points.first(),
        }
    }
}

/// Triangulates a zone's floor footprint and records triangle centroids.
pub struct BuildInteriorReference<'a> {
    zone: &'a str,
    floor: &'a [Point3],
}

impl<'a> BuildInteriorReference<'a> {
    /// Creates a new `BuildInteriorReference` operation for a floor polygon.
    #[must_use]
    pub fn new(zone: &'a str, floor: &'a [Point3]) -> Self {
        Self { zone, floor }
    }

    /// Builds the reference for a zone's single floor surface.
    ///
    /// # Errors
    ///
    /// Returns `MissingFloor` or `MultipleFloors` if the zone does not have
    /// exactly one usable floor, otherwise whatever [`Self::execute`] returns.
    pub fn for_zone(zone: &ZoneContext<'_>) -> Result<InteriorReference, ZoneError> {
        let floor = zone.floor()?;
        BuildInteriorReference::new(zone.name(), &floor.vertices).execute()
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// * `MissingFloor` if the floor has fewer than 3 vertices.
    /// * `DegenerateFloor` if the footprint encloses no area in XY.
    /// * `Triangulation` if spade rejects a point or boundary edges cross.
    pub fn execute(&self) -> Result<InteriorReference, ZoneError> {
        if self.floor.len() < 3 {
            return Err(ZoneError::MissingFloor {
                zone: self.zone.to_owned(),
            });
        }

        let triangles = triangulate_footprint(self.floor).map_err(|e| {
            let reason = match e {
                FootprintError::Insert(msg) => msg,
                FootprintError::CrossingEdges { from, to } => {
                    format!("floor edge {from}-{to} crosses another edge")
                }
            };
            ZoneError::Triangulation {
                zone: self.zone.to_owned(),
                reason,
            }
        })?;

        if triangles.is_empty() {
            return Err(ZoneError::DegenerateFloor {
                zone: self.zone.to_owned(),
            });
        }

        let points: Vec<InteriorPoint> = triangles
            .into_iter()
            .enumerate()
            .map(|(index, triangle)| InteriorPoint {
                index,
                triangle,
                point: triangle.centroid(),
            })
            .collect();
        debug!(zone = self.zone, triangles = points.len(), "floor triangulated");

        Ok(InteriorReference {
            zone: self.zone.to_owned(),
            points,
        })
    }
}
