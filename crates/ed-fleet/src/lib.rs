//! `ed-fleet` — the vehicles that can be dispatched and the incident they
//! are dispatched to.
//!
//! | Module      | Contents                                  |
//! |-------------|-------------------------------------------|
//! | [`vehicle`] | `Vehicle`, `Incident`                     |
//! | [`roster`]  | `load_roster_csv`, `load_roster_reader`   |
//! | [`error`]   | `FleetError`, `FleetResult<T>`            |

pub mod error;
pub mod roster;
pub mod vehicle;


pub use error::{FleetError, FleetResult};
pub use roster::{load_roster_csv, load_roster_reader};
pub use vehicle::{Incident, Vehicle};
