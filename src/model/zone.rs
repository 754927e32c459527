use std::collections::{HashMap, HashSet};

use crate::error::{InputError, ZoneError};
use crate::operations::interior::InteriorReference;

use super::surface::{Surface, SurfaceType};

/// Everything one zone needs, built once per run.
///
/// Holds exclusive borrows of the zone's surfaces, so contexts of different
/// zones can be processed on different threads.
#[derive(Debug)]
pub struct ZoneContext<'a> {
    name: String,
    surfaces: Vec<&'a mut Surface>,
    interior: Option<InteriorReference>,
}

impl<'a> ZoneContext<'a> {
    /// Creates an empty context for the named zone.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surfaces: Vec::new(),
            interior: None,
        }
    }

    /// Groups surfaces by zone, preserving first-appearance order of zones
    /// and the input order of surfaces inside each zone.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if any record breaks the surface contract
    /// or two surfaces share a name.
    pub fn group(surfaces: &'a mut [Surface]) -> Result<Vec<Self>, InputError> {
        validate_records(surfaces)?;

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut zones: Vec<Self> = Vec::new();
        for surface in surfaces {
            let slot = match index.get(&surface.zone_name) {
                Some(&i) => i,
                None => {
                    index.insert(surface.zone_name.clone(), zones.len());
                    zones.push(Self::new(surface.zone_name.clone()));
                    zones.len() - 1
                }
            };
            zones[slot].surfaces.push(surface);
        }
        Ok(zones)
    }

    /// Zone name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member surfaces in input order.
    #[must_use]
    pub fn surfaces(&self) -> &[&'a mut Surface] {
        &self.surfaces
    }

    /// Mutable access to member surfaces.
    pub fn surfaces_mut(&mut self) -> &mut [&'a mut Surface] {
        &mut self.surfaces
    }

    /// Number of member surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// `true` if the zone has no surfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// The zone's single floor surface.
    ///
    /// # Errors
    ///
    /// `MissingFloor` if there is no floor or it has fewer than 3 vertices,
    /// `MultipleFloors` if there is more than one.
    pub fn floor(&self) -> Result<&Surface, ZoneError> {
        let mut floors = self
            .surfaces
            .iter()
            .filter(|s| s.surface_type == SurfaceType::Floor);
        let Some(floor) = floors.next() else {
            return Err(ZoneError::MissingFloor {
                zone: self.name.clone(),
            });
        };
        let extra = floors.count();
        if extra > 0 {
            return Err(ZoneError::MultipleFloors {
                zone: self.name.clone(),
                count: extra + 1,
            });
        }
        if floor.vertices.len() < 3 {
            return Err(ZoneError::MissingFloor {
                zone: self.name.clone(),
            });
        }
        Ok(&**floor)
    }

    /// The interior reference, once built.
    #[must_use]
    pub fn interior(&self) -> Option<&InteriorReference> {
        self.interior.as_ref()
    }

    /// Stores the interior reference for later stages.
    pub fn set_interior(&mut self, interior: InteriorReference) {
        self.interior = Some(interior);
    }
}

/// Checks every record and rejects duplicate surface names.
fn validate_records(surfaces: &[Surface]) -> Result<(), InputError> {
    let mut names = HashSet::new();
    for surface in surfaces {
        surface.validate()?;
        if !names.insert(surface.name.as_str()) {
            return Err(InputError::DuplicateSurface(surface.name.clone()));
        }
    }
    Ok(())
}
