use thiserror::Error;

/// Top-level error type for zone geometry processing.
#[derive(Debug, Error)]
pub enum ZonegeomError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Violations of the surface record contract.
///
/// These indicate the upstream schema validation was bypassed and abort the
/// whole run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("surface '{surface}' has {count} vertices, at least 3 are required")]
    TooFewVertices { surface: String, count: usize },

    #[error("surface '{surface}' has a non-finite coordinate at vertex {index}")]
    NonFiniteVertex { surface: String, index: usize },

    #[error("surface name must not be empty")]
    EmptySurfaceName,

    #[error("surface '{surface}' has an empty zone name")]
    EmptyZoneName { surface: String },

    #[error("duplicate surface name '{0}'")]
    DuplicateSurface(String),
}

/// Per-zone failures. Recoverable: other zones keep processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("zone '{zone}' has no floor surface with at least 3 vertices")]
    MissingFloor { zone: String },

    #[error("zone '{zone}' has {count} floor surfaces, expected exactly one")]
    MultipleFloors { zone: String, count: usize },

    #[error("floor of zone '{zone}' does not enclose any area")]
    DegenerateFloor { zone: String },

    #[error("floor triangulation failed for zone '{zone}': {reason}")]
    Triangulation { zone: String, reason: String },
}

impl ZoneError {
    /// Name of the zone the error belongs to.
    #[must_use]
    pub fn zone(&self) -> &str {
        match self {
            Self::MissingFloor { zone }
            | Self::MultipleFloors { zone, .. }
            | Self::DegenerateFloor { zone }
            | Self::Triangulation { zone, .. } => zone,
        }
    }
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`ZonegeomError`].
pub type Result<T> = std::result::Result<T, ZonegeomError>;
