//! `ed-core` — foundational types for the emergency dispatch workspace.
//!
//! This crate is a dependency of every other `ed-*` crate.  It has no `ed-*`
//! dependencies and no required external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module  | Contents                                        |
//! |---------|-------------------------------------------------|
//! | [`ids`] | `NodeId`, `EdgeId`                              |
//! | [`geo`] | `GeoPoint`, haversine distance                  |
//! | [`eta`] | `Eta`, `estimate` (distance + speed → minutes)  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod eta;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use eta::{Eta, estimate};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
