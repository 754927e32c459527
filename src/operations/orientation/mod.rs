use tracing::warn;

use crate::math::polygon_2d::{signed_area, winding, Winding};
use crate::math::polygon_3d::{centroid, try_normalize, vertex_normals};
use crate::math::{LocalFrame, Point2, Point3, Vector3};
use crate::model::{Surface, SurfaceType};
use crate::operations::interior::InteriorReference;

/// How far orientation resolution got for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationStatus {
    /// Outward direction found and a local frame built.
    Resolved,
    /// The reference point coincides with the centroid; the identity frame
    /// was used instead.
    DegenerateOutward,
    /// No interior reference point matched; orientation was skipped.
    Unmatched,
}

/// Result of orienting one surface.
#[derive(Debug, Clone)]
pub struct SurfaceOrientation {
    pub centroid: Point3,
    /// One candidate normal per vertex; `None` where the arms are collinear.
    pub vertex_normals: Vec<Option<Vector3>>,
    /// Index of the interior point used, if any.
    pub reference: Option<usize>,
    /// Unit vector from the interior point towards the centroid.
    pub outward: Option<Vector3>,
    pub frame: Option<LocalFrame>,
    /// Vertices on the local `(x, z)` test plane, in vertex order.
    pub projected: Vec<Point2>,
    /// Floors and roofs viewed along their fixed outward axis (-Z for floors,
    /// +Z for roofs), in vertex order. Empty for other surfaces.
    pub plan: Vec<Point2>,
    /// Shoelace area of `plan`; only computed for floors and roofs.
    pub signed_area: Option<f64>,
    pub status: OrientationStatus,
}

impl SurfaceOrientation {
    /// Winding of a floor or roof viewed from outside the zone.
    ///
    /// The outward axis maps to +Y, and the right-handed normal of the
    /// `(x, z)` plane is -Y, so the plan is seen from inside. The 2D winding
    /// is therefore flipped.
    #[must_use]
    pub fn winding(&self) -> Option<Winding> {
        self.signed_area?;
        Some(match winding(&self.plan) {
            Winding::CounterClockwise => Winding::Clockwise,
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::Degenerate => Winding::Degenerate,
        })
    }

    /// `true` if any candidate normal was degenerate.
    #[must_use]
    pub fn has_degenerate_normal(&self) -> bool {
        self.vertex_normals.iter().any(Option::is_none)
    }

    /// Averaged vertex normal, if at least one candidate exists.
    #[must_use]
    pub fn mean_normal(&self) -> Option<Vector3> {
        let sum = self
            .vertex_normals
            .iter()
            .flatten()
            .fold(Vector3::zeros(), |acc, n| acc + n);
        try_normalize(&sum).ok()
    }
}

/// Computes centroid, candidate normals, outward direction and the local
/// projection of a surface.
pub struct ResolveOrientation<'a> {
    surface: &'a Surface,
    interior: Option<&'a InteriorReference>,
}

impl<'a> ResolveOrientation<'a> {
    /// Creates a new `ResolveOrientation` operation.
    ///
    /// `interior` is the surface zone's reference; `None` when the zone has
    /// no usable floor.
    #[must_use]
    pub fn new(surface: &'a Surface, interior: Option<&'a InteriorReference>) -> Self {
        Self { surface, interior }
    }

    /// Executes the resolution. Never fails: missing or degenerate inputs are
    /// reported through [`SurfaceOrientation::status`].
    #[must_use]
    pub fn execute(&self) -> SurfaceOrientation {
        let points = &self.surface.vertices;
        let c = centroid(points);
        let normals = vertex_normals(points, &c);

        if normals.iter().any(Option::is_none) {
            warn!(
                surface = %self.surface.name,
                "degenerate candidate normal (collinear vertices)"
            );
        }

        let plan = plan_axis(self.surface.surface_type)
            .map(|axis| {
                let frame = LocalFrame::new(c, &axis);
                points.iter().map(|p| frame.project(p)).collect::<Vec<_>>()
            })
            .unwrap_or_default();
        let area = (!plan.is_empty()).then(|| signed_area(&plan));

        let matched = self
            .interior
            .and_then(|reference| reference.match_surface(self.surface));
        let Some(ip) = matched else {
            warn!(
                surface = %self.surface.name,
                zone = %self.surface.zone_name,
                "no interior reference point, orientation skipped"
            );
            return SurfaceOrientation {
                centroid: c,
                vertex_normals: normals,
                reference: None,
                outward: None,
                frame: None,
                projected: Vec::new(),
                plan,
                signed_area: area,
                status: OrientationStatus::Unmatched,
            };
        };

        let outward = try_normalize(&(c - ip.point)).ok();
        let status = if outward.is_some() {
            OrientationStatus::Resolved
        } else {
            warn!(
                surface = %self.surface.name,
                "outward direction is degenerate, using identity frame"
            );
            OrientationStatus::DegenerateOutward
        };

        let frame = LocalFrame::new(c, &outward.unwrap_or_else(Vector3::zeros));
        let projected: Vec<Point2> = points.iter().map(|p| frame.project(p)).collect();

        SurfaceOrientation {
            centroid: c,
            vertex_normals: normals,
            reference: Some(ip.index),
            outward,
            frame: Some(frame),
            projected,
            plan,
            signed_area: area,
            status,
        }
    }
}

/// Outward axis of surfaces whose side of the zone is fixed by their type.
fn plan_axis(surface_type: SurfaceType) -> Option<Vector3> {
    match surface_type {
        SurfaceType::Floor => Some(-Vector3::z()),
        SurfaceType::Roof => Some(Vector3::z()),
        SurfaceType::Wall | SurfaceType::Other => None,
    }
}
