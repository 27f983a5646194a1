use thiserror::Error;

use ed_core::GeoPoint;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("roster parse error: {0}")]
    Parse(String),

    #[error("duplicate vehicle name {0:?}")]
    DuplicateVehicle(String),

    #[error("vehicle {name:?} has an invalid coordinate {pos}")]
    InvalidCoordinate { name: String, pos: GeoPoint },

    #[error("invalid incident coordinate {0}")]
    InvalidIncident(GeoPoint),

    #[error("roster is empty")]
    EmptyRoster,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
