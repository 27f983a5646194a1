//! Vehicles and incidents.

use std::fmt;

use ed_core::GeoPoint;

use crate::{FleetError, FleetResult};

/// A dispatchable vehicle: a unique name at a current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub pos:  GeoPoint,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, pos: GeoPoint) -> Self {
        Self { name: name.into(), pos }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.name, self.pos)
    }
}

/// The location a vehicle must reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incident {
    pub pos: GeoPoint,
}

impl Incident {
    /// Validate and wrap an operator-supplied coordinate.
    pub fn new(pos: GeoPoint) -> FleetResult<Self> {
        if !pos.is_valid() {
            return Err(FleetError::InvalidIncident(pos));
        }
        Ok(Self { pos })
    }
}
