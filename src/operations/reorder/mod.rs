use tracing::{debug, warn};

use crate::config::WindingPolicy;
use crate::math::polygon_2d::{non_negative, non_positive, Winding};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::model::{Surface, SurfaceType};
use crate::operations::orientation::SurfaceOrientation;

/// How the start vertex was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartSelection {
    /// Farthest vertex inside the rule's quadrant.
    Quadrant,
    /// No vertex in the quadrant; nearest vertex to the origin (floors, roofs).
    Nearest,
    /// No vertex in the quadrant; order kept (walls, other).
    Kept,
    /// No local projection available; order kept.
    Skipped,
}

/// Chosen start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartVertex {
    pub index: usize,
    pub selection: StartSelection,
}

/// Picks the start vertex of a surface.
///
/// Floors use the third quadrant (`x <= 0, y <= 0`) and roofs the second
/// (`x <= 0, y >= 0`) of the world XY plane, taking the farthest vertex from
/// the origin and falling back to the nearest one. Walls and other surfaces
/// use the first quadrant of their local projection, taking the farthest
/// point and otherwise keeping the current order.
///
/// Distances within [`TOLERANCE`] tie, and ties go to the lowest index, so
/// the selection is stable under its own rotation.
#[must_use]
pub fn select_start(
    surface_type: SurfaceType,
    vertices: &[Point3],
    projected: &[Point2],
) -> StartVertex {
    match surface_type {
        SurfaceType::Floor => select_world(vertices, |x, y| non_positive(x) && non_positive(y)),
        SurfaceType::Roof => select_world(vertices, |x, y| non_positive(x) && non_negative(y)),
        SurfaceType::Wall | SurfaceType::Other => select_local(projected),
    }
}

fn select_world(vertices: &[Point3], in_quadrant: impl Fn(f64, f64) -> bool) -> StartVertex {
    let distances = vertices.iter().map(|v| v.x.hypot(v.y));
    let quadrant = farthest(
        distances
            .clone()
            .enumerate()
            .filter(|&(i, _)| in_quadrant(vertices[i].x, vertices[i].y)),
    );
    if let Some(index) = quadrant {
        return StartVertex {
            index,
            selection: StartSelection::Quadrant,
        };
    }
    StartVertex {
        index: nearest(distances.enumerate()).unwrap_or(0),
        selection: StartSelection::Nearest,
    }
}

fn select_local(projected: &[Point2]) -> StartVertex {
    if projected.is_empty() {
        return StartVertex {
            index: 0,
            selection: StartSelection::Skipped,
        };
    }
    let candidates = projected
        .iter()
        .enumerate()
        .filter(|(_, q)| non_negative(q.x) && non_negative(q.y))
        .map(|(i, q)| (i, q.coords.norm()));
    match farthest(candidates) {
        Some(index) => StartVertex {
            index,
            selection: StartSelection::Quadrant,
        },
        None => StartVertex {
            index: 0,
            selection: StartSelection::Kept,
        },
    }
}

fn farthest(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in candidates {
        match best {
            Some((_, bd)) if d <= bd + TOLERANCE => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

fn nearest(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in candidates {
        match best {
            Some((_, bd)) if d >= bd - TOLERANCE => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// What canonicalization did to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOutcome {
    pub start: StartVertex,
    /// Winding seen from outside before any reversal (floors and roofs).
    pub winding: Option<Winding>,
    /// `true` if the vertex list was reversed with its zone.
    pub reversed: bool,
}

/// Decides whether a whole zone is reversed under `policy`.
///
/// `windings` are the outside windings of the zone's floors and roofs.
/// The zone flips when at least one of them is clockwise and none is
/// counter-clockwise; degenerate and unknown windings do not vote. Every
/// surface of the zone is then reversed together, so shared edges keep
/// running in opposite directions and a closed zone stays closed.
#[must_use]
pub fn reverse_zone(
    policy: WindingPolicy,
    windings: impl IntoIterator<Item = Option<Winding>>,
) -> bool {
    if policy == WindingPolicy::Preserve {
        return false;
    }
    let (mut clockwise, mut counter) = (0usize, 0usize);
    for w in windings.into_iter().flatten() {
        match w {
            Winding::Clockwise => clockwise += 1,
            Winding::CounterClockwise => counter += 1,
            Winding::Degenerate => {}
        }
    }
    if clockwise > 0 && counter > 0 {
        warn!(clockwise, counter, "floors and roofs disagree on winding, zone kept");
    }
    clockwise > 0 && counter == 0
}

/// Rotates a surface's vertex list to its canonical start vertex.
///
/// Rotation keeps the cyclic adjacency. The list is reversed first only when
/// asked to with [`Self::with_reversal`].
pub struct CanonicalizeSurface<'a> {
    orientation: &'a SurfaceOrientation,
    reverse: bool,
}

impl<'a> CanonicalizeSurface<'a> {
    /// Creates a new `CanonicalizeSurface` operation from a resolved orientation.
    #[must_use]
    pub fn new(orientation: &'a SurfaceOrientation) -> Self {
        Self {
            orientation,
            reverse: false,
        }
    }

    /// Reverses the vertex list before picking the start vertex.
    #[must_use]
    pub fn with_reversal(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Executes the reorder in place.
    ///
    /// The orientation must have been resolved for `surface` in its current
    /// vertex order.
    pub fn execute(&self, surface: &mut Surface) -> ReorderOutcome {
        let winding = self.orientation.winding();
        let reversed = self.reverse;
        let mut projected = self.orientation.projected.clone();
        if reversed {
            surface.vertices.reverse();
            projected.reverse();
        }

        let start = select_start(surface.surface_type, &surface.vertices, &projected);
        if start.index > 0 {
            surface.vertices.rotate_left(start.index);
        }
        debug!(
            surface = %surface.name,
            start = start.index,
            selection = ?start.selection,
            reversed,
            "surface canonicalized"
        );

        ReorderOutcome {
            start,
            winding,
            reversed,
        }
    }
}
