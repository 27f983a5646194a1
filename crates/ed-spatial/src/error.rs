//! Errors from network loading, snapping, and routing.

use thiserror::Error;

use ed_core::NodeId;

/// Errors produced by `ed-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("road network for {area:?} could not be loaded: {reason}")]
    NetworkLoad { area: String, reason: String },

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("no node found: road network is empty")]
    NoNodeFound,

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
