use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::math::Point3;

use super::vertex::vertex_list;

/// Role of a surface within its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurfaceType {
    Floor,
    Roof,
    Wall,
    /// Any other bounding surface (ceilings, partitions, ...).
    Other,
}

impl SurfaceType {
    /// Canonical name, as used in surface records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Floor => "Floor",
            Self::Roof => "Roof",
            Self::Wall => "Wall",
            Self::Other => "Other",
        }
    }
}

impl From<&str> for SurfaceType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "floor" => Self::Floor,
            "roof" => Self::Roof,
            "wall" => Self::Wall,
            _ => Self::Other,
        }
    }
}

impl From<String> for SurfaceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SurfaceType> for String {
    fn from(value: SurfaceType) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planar polygon bounding a zone.
///
/// Canonicalization only ever rotates (or, under an explicit winding policy,
/// reverses) `vertices`; the vertex multiset never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    pub zone_name: String,
    pub surface_type: SurfaceType,
    #[serde(with = "vertex_list")]
    pub vertices: Vec<Point3>,
}

impl Surface {
    /// Creates a new surface record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        zone_name: impl Into<String>,
        surface_type: SurfaceType,
        vertices: Vec<Point3>,
    ) -> Self {
        Self {
            name: name.into(),
            zone_name: zone_name.into(),
            surface_type,
            vertices,
        }
    }

    /// Checks the record contract: names present, at least three finite vertices.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::EmptySurfaceName);
        }
        if self.zone_name.trim().is_empty() {
            return Err(InputError::EmptyZoneName {
                surface: self.name.clone(),
            });
        }
        if self.vertices.len() < 3 {
            return Err(InputError::TooFewVertices {
                surface: self.name.clone(),
                count: self.vertices.len(),
            });
        }
        if let Some(index) = self
            .vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(InputError::NonFiniteVertex {
                surface: self.name.clone(),
                index,
            });
        }
        Ok(())
    }
}
