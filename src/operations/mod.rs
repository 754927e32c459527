pub mod closure;
pub mod interior;
pub mod orientation;
pub mod pipeline;
pub mod reorder;

pub use closure::{CheckClosure, ClosureReport, OpenVertex};
pub use interior::{BuildInteriorReference, InteriorPoint, InteriorReference, Triangle, TriangleKey};
pub use orientation::{OrientationStatus, ResolveOrientation, SurfaceOrientation};
pub use pipeline::{
    BuildingReport, CanonicalizeBuilding, ClosureFailure, ProcessZone, RunSummary,
    SurfaceDiagnostic, SurfaceReport, ZoneReport,
};
pub use reorder::{
    reverse_zone, select_start, CanonicalizeSurface, ReorderOutcome, StartSelection, StartVertex,
};
