//! CSV roster loader.
//!
//! # CSV format
//!
//! One row per vehicle; row order is roster order (and the tie-break order of
//! a ranking).
//!
//! ```csv
//! name,lat,lon
//! Vehicle A,19.0913,72.8549
//! Vehicle B,19.0760,72.8777
//! ```
//!
//! Names are trimmed and must be unique.  Coordinates must be valid WGS-84.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ed_core::GeoPoint;

use crate::vehicle::Vehicle;
use crate::{FleetError, FleetResult};

#[derive(Deserialize)]
struct RosterRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

/// Load a vehicle roster from a CSV file.
pub fn load_roster_csv(path: &Path) -> FleetResult<Vec<Vehicle>> {
    let file = std::fs::File::open(path).map_err(FleetError::Io)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// [`FleetError::Parse`] for malformed rows, [`FleetError::DuplicateVehicle`],
/// [`FleetError::InvalidCoordinate`], and [`FleetError::EmptyRoster`] when no
/// rows are present.
pub fn load_roster_reader<R: Read>(reader: R) -> FleetResult<Vec<Vehicle>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen: HashSet<String> = HashSet::new();
    let mut vehicles = Vec::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        let pos = GeoPoint::new(row.lat, row.lon);

        if row.name.is_empty() {
            return Err(FleetError::Parse("vehicle name must not be empty".into()));
        }
        if !pos.is_valid() {
            return Err(FleetError::InvalidCoordinate { name: row.name, pos });
        }
        if !seen.insert(row.name.clone()) {
            return Err(FleetError::DuplicateVehicle(row.name));
        }

        vehicles.push(Vehicle::new(row.name, pos));
    }

    if vehicles.is_empty() {
        return Err(FleetError::EmptyRoster);
    }
    Ok(vehicles)
}
