use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::ProcessOptions;
use crate::error::{Result, ZoneError};
use crate::math::polygon_2d::Winding;
use crate::math::Point3;
use crate::model::{Surface, SurfaceType, ZoneContext};

use super::closure::{CheckClosure, ClosureReport};
use super::interior::BuildInteriorReference;
use super::orientation::{OrientationStatus, ResolveOrientation, SurfaceOrientation};
use super::reorder::{reverse_zone, CanonicalizeSurface, ReorderOutcome, StartSelection};

/// A recoverable, surface-level condition worth surfacing to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceDiagnostic {
    /// At least one candidate normal came from collinear vertices.
    DegenerateNormal { surface: String },
    /// The outward direction had zero length; the identity frame was used.
    DegenerateOutward { surface: String },
    /// No interior reference point; the local-frame step was skipped.
    UnmatchedOrientation { surface: String },
}

/// What happened to one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceReport {
    pub name: String,
    pub surface_type: SurfaceType,
    pub status: OrientationStatus,
    pub outcome: ReorderOutcome,
}

impl SurfaceReport {
    /// `true` if the vertex list changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.outcome.reversed || self.outcome.start.index > 0
    }
}

/// A closure failure: `{zone, vertex}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosureFailure<'r> {
    pub zone: &'r str,
    pub vertex: Point3,
}

/// Result of processing one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneReport {
    pub zone: String,
    /// Set when the interior reference could not be built.
    pub error: Option<ZoneError>,
    pub closure: ClosureReport,
    pub surfaces: Vec<SurfaceReport>,
    pub diagnostics: Vec<SurfaceDiagnostic>,
}

impl ZoneReport {
    /// `true` if the zone's surfaces enclose a solid.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closure.is_closed()
    }

    /// `true` if the zone is closed and had no zone-level error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.is_closed()
    }
}

/// Runs interior reference, orientation, reorder and closure for one zone.
pub struct ProcessZone {
    options: ProcessOptions,
}

impl ProcessZone {
    /// Creates a new `ProcessZone` operation.
    #[must_use]
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Executes the per-zone pipeline, reordering the zone's surfaces in place.
    ///
    /// Zone-level failures are recorded in the report instead of aborting:
    /// floors and roofs are still reordered and closure is still checked.
    #[must_use]
    pub fn execute(&self, zone: &mut ZoneContext<'_>) -> ZoneReport {
        let error = match BuildInteriorReference::for_zone(zone) {
            Ok(reference) => {
                zone.set_interior(reference);
                None
            }
            Err(e) => {
                warn!(zone = zone.name(), error = %e, "no interior reference");
                Some(e)
            }
        };

        let orientations: Vec<SurfaceOrientation> = zone
            .surfaces()
            .iter()
            .map(|s| ResolveOrientation::new(s, zone.interior()).execute())
            .collect();

        let reverse = reverse_zone(
            self.options.winding,
            orientations.iter().map(SurfaceOrientation::winding),
        );
        if reverse {
            debug!(zone = zone.name(), "zone winding reversed");
        }

        let mut diagnostics = Vec::new();
        let mut surfaces = Vec::with_capacity(orientations.len());
        for (surface, orientation) in zone.surfaces_mut().iter_mut().zip(&orientations) {
            collect_diagnostics(surface, orientation, &mut diagnostics);
            let outcome = CanonicalizeSurface::new(orientation)
                .with_reversal(reverse)
                .execute(surface);
            surfaces.push(SurfaceReport {
                name: surface.name.clone(),
                surface_type: surface.surface_type,
                status: orientation.status,
                outcome,
            });
        }

        let closure = CheckClosure::new(zone.name(), zone.surfaces().iter().map(|s| &**s)).execute();
        info!(
            zone = zone.name(),
            surfaces = surfaces.len(),
            closed = closure.is_closed(),
            "zone processed"
        );

        ZoneReport {
            zone: zone.name().to_owned(),
            error,
            closure,
            surfaces,
            diagnostics,
        }
    }
}

fn collect_diagnostics(
    surface: &Surface,
    orientation: &SurfaceOrientation,
    out: &mut Vec<SurfaceDiagnostic>,
) {
    let name = || surface.name.clone();
    if orientation.has_degenerate_normal() {
        out.push(SurfaceDiagnostic::DegenerateNormal { surface: name() });
    }
    match orientation.status {
        OrientationStatus::Resolved => {}
        OrientationStatus::DegenerateOutward => {
            out.push(SurfaceDiagnostic::DegenerateOutward { surface: name() });
        }
        OrientationStatus::Unmatched => {
            out.push(SurfaceDiagnostic::UnmatchedOrientation { surface: name() });
        }
    }
}

/// Canonicalizes every surface of a building and checks each zone's closure.
pub struct CanonicalizeBuilding<'a> {
    surfaces: &'a mut [Surface],
    options: ProcessOptions,
}

impl<'a> CanonicalizeBuilding<'a> {
    /// Creates a new `CanonicalizeBuilding` operation with default options.
    #[must_use]
    pub fn new(surfaces: &'a mut [Surface]) -> Self {
        Self {
            surfaces,
            options: ProcessOptions::default(),
        }
    }

    /// Sets the run options.
    #[must_use]
    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the run. Vertex lists are reordered in place; the order of
    /// the slice itself never changes.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if a surface record breaks the input contract.
    /// Zone-level problems are reported in the returned [`BuildingReport`].
    pub fn execute(self) -> Result<BuildingReport> {
        let options = self.options;
        let mut zones = ZoneContext::group(self.surfaces)?;
        let op = ProcessZone::new(options);

        let reports: Vec<ZoneReport> = if options.parallel {
            zones.par_iter_mut().map(|z| op.execute(z)).collect()
        } else {
            zones.iter_mut().map(|z| op.execute(z)).collect()
        };

        let report = BuildingReport { zones: reports };
        let summary = report.summary();
        info!(
            zones = summary.zones,
            closed = summary.closed_zones,
            failed = summary.failed_zones,
            reordered = summary.reordered_surfaces,
            skipped = summary.skipped_surfaces,
            "building canonicalized"
        );
        Ok(report)
    }
}

/// Per-zone reports of a whole run, in first-appearance order of zones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingReport {
    pub zones: Vec<ZoneReport>,
}

/// Aggregate counts over a [`BuildingReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub zones: usize,
    pub closed_zones: usize,
    /// Zones whose interior reference could not be built.
    pub failed_zones: usize,
    /// Surfaces whose vertex list changed.
    pub reordered_surfaces: usize,
    /// Surfaces whose local-frame step was skipped.
    pub skipped_surfaces: usize,
}

impl BuildingReport {
    /// `true` if every zone is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.zones.iter().all(ZoneReport::is_closed)
    }

    /// Report of the named zone.
    #[must_use]
    pub fn zone(&self, name: &str) -> Option<&ZoneReport> {
        self.zones.iter().find(|z| z.zone == name)
    }

    /// Zones that failed the closure check.
    pub fn open_zones(&self) -> impl Iterator<Item = &ZoneReport> {
        self.zones.iter().filter(|z| !z.is_closed())
    }

    /// Every closure failure across all zones.
    #[must_use]
    pub fn failures(&self) -> Vec<ClosureFailure<'_>> {
        self.zones
            .iter()
            .flat_map(|z| {
                z.closure.open_vertices.iter().map(|o| ClosureFailure {
                    zone: &z.zone,
                    vertex: o.vertex,
                })
            })
            .collect()
    }

    /// Aggregate counts.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let mut s = RunSummary {
            zones: self.zones.len(),
            ..RunSummary::default()
        };
        for z in &self.zones {
            if z.is_closed() {
                s.closed_zones += 1;
            }
            if z.error.is_some() {
                s.failed_zones += 1;
            }
            for surface in &z.surfaces {
                if surface.changed() {
                    s.reordered_surfaces += 1;
                }
                if surface.outcome.start.selection == StartSelection::Skipped {
                    s.skipped_surfaces += 1;
                }
            }
        }
        s
    }
}

impl fmt::Display for BuildingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary();
        writeln!(f, "Zone Geometry Report:")?;
        writeln!(f, "  Zones: {} ({} closed)", s.zones, s.closed_zones)?;
        writeln!(f, "  Reordered surfaces: {}", s.reordered_surfaces)?;
        writeln!(f, "  Skipped surfaces: {}", s.skipped_surfaces)?;
        for z in &self.zones {
            let status = if z.is_closed() { "closed" } else { "OPEN" };
            writeln!(f, "  {}: {status}", z.zone)?;
            if let Some(e) = &z.error {
                writeln!(f, "    error: {e}")?;
            }
            for open in &z.closure.open_vertices {
                writeln!(
                    f,
                    "    open vertex ({}, {}, {}) with {} neighbours",
                    open.vertex.x, open.vertex.y, open.vertex.z, open.neighbors
                )?;
            }
            for surface in &z.surfaces {
                if surface.outcome.winding == Some(Winding::Clockwise) && !surface.outcome.reversed {
                    writeln!(f, "    {} is clockwise from outside", surface.name)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{InputError, ZonegeomError};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn floor(zone: &str, name: &str, x0: f64) -> Surface {
        Surface::new(
            name,
            zone,
            SurfaceType::Floor,
            vec![p(x0, 0.0, 0.0), p(x0 + 4.0, 0.0, 0.0), p(x0 + 4.0, 4.0, 0.0), p(x0, 4.0, 0.0)],
        )
    }

    #[test]
    fn missing_floor_is_recorded_not_fatal() {
        let mut surfaces = vec![
            Surface::new(
                "w",
                "Z1",
                SurfaceType::Wall,
                vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 0.0, 3.0)],
            ),
            floor("Z2", "f2", 10.0),
        ];
        let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
        let z1 = report.zone("Z1").unwrap();
        assert_eq!(z1.error, Some(ZoneError::MissingFloor { zone: "Z1".into() }));
        assert_eq!(
            z1.diagnostics,
            vec![SurfaceDiagnostic::UnmatchedOrientation { surface: "w".into() }]
        );
        assert_eq!(z1.surfaces[0].outcome.start.selection, StartSelection::Skipped);
        assert!(report.zone("Z2").unwrap().error.is_none());
        assert_eq!(report.summary().failed_zones, 1);
        assert_eq!(report.summary().skipped_surfaces, 1);
    }

    #[test]
    fn floors_still_reorder_without_reference() {
        let mut surfaces = vec![floor("Z1", "a", -2.0), floor("Z1", "b", -2.0)];
        surfaces[0].vertices.rotate_left(2);
        let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
        let z1 = report.zone("Z1").unwrap();
        assert!(matches!(z1.error, Some(ZoneError::MultipleFloors { count: 2, .. })));
        assert_eq!(surfaces[0].vertices[0], p(-2.0, 0.0, 0.0));
    }

    #[test]
    fn input_errors_are_fatal() {
        let mut surfaces = vec![floor("Z1", "f", 0.0), floor("Z2", "f", 10.0)];
        let err = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap_err();
        assert!(matches!(
            err,
            ZonegeomError::Input(InputError::DuplicateSurface(_))
        ));
    }

    #[test]
    fn lone_floor_is_open_and_listed() {
        let mut surfaces = vec![floor("Z1", "f", 0.0)];
        let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
        assert!(!report.is_closed());
        assert_eq!(report.open_zones().count(), 1);
        let failures = report.failures();
        assert_eq!(failures.len(), 4);
        assert!(failures.iter().all(|f| f.zone == "Z1"));
        let text = report.to_string();
        assert!(text.contains("Z1: OPEN"));
    }
}
