//! `ed-spatial` — road network, nearest-node snapping, shortest paths, and
//! the cached network provider.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`       |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                |
//! | [`provider`] | `NetworkSource` trait, `NetworkProvider` (area cache)    |
//! | [`osm`]      | `PbfDirectory`, `load_from_pbf` (feature = `"osm"` only) |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.     |
//! | `serde` | Derives `Serialize`/`Deserialize` on core types.    |

pub mod error;
pub mod network;
pub mod provider;
pub mod router;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use provider::{NetworkProvider, NetworkSource};
pub use router::{DijkstraRouter, Route, Router};
