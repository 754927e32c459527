//! Canonical vertex ordering and watertightness checks for building zones.
//!
//! Surfaces are grouped by zone. Each zone's floor is triangulated to obtain
//! interior reference points, every surface is oriented against them and
//! rotated to a canonical start vertex, and the zone's directed-edge graph is
//! checked for open corners.

pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod operations;

pub use config::{ProcessOptions, WindingPolicy};
pub use error::{Result, ZonegeomError};
pub use model::{Surface, SurfaceType};
pub use operations::{BuildingReport, CanonicalizeBuilding};
