//! Lazily loaded, process-lifetime cache of road networks keyed by area name.
//!
//! Building a city network is expensive, so [`NetworkProvider::get`] loads an
//! area through its [`NetworkSource`] once and hands out the same
//! `Arc<RoadNetwork>` on every later call.  Networks are read-only, so the
//! `Arc` is shared without further locking.  The cache is only dropped on an
//! explicit [`invalidate`](NetworkProvider::invalidate) or
//! [`clear`](NetworkProvider::clear).

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Where road networks come from (an OSM extract, a synthetic grid, a test
/// fixture, …).
pub trait NetworkSource: Send + Sync {
    /// Build the network for `area`.
    ///
    /// Implementations should report unresolvable areas and unreachable data
    /// as [`SpatialError::NetworkLoad`].
    fn load(&self, area: &str) -> SpatialResult<RoadNetwork>;
}

impl<F> NetworkSource for F
where
    F: Fn(&str) -> SpatialResult<RoadNetwork> + Send + Sync,
{
    fn load(&self, area: &str) -> SpatialResult<RoadNetwork> {
        self(area)
    }
}

/// Cache-on-first-use wrapper around a [`NetworkSource`].
pub struct NetworkProvider<S: NetworkSource> {
    source: S,
    cache:  RwLock<FxHashMap<String, Arc<RoadNetwork>>>,
}

impl<S: NetworkSource> NetworkProvider<S> {
    pub fn new(source: S) -> Self {
        Self { source, cache: RwLock::new(FxHashMap::default()) }
    }

    /// Return the network for `area`, loading it on first use.
    ///
    /// Failed loads are not cached; the next call tries the source again.
    /// Any error from the source other than `NetworkLoad` is wrapped into
    /// `NetworkLoad` so callers have a single fatal case to handle.
    pub fn get(&self, area: &str) -> SpatialResult<Arc<RoadNetwork>> {
        if let Some(network) = self.cache.read().get(area) {
            debug!(area, "road network cache hit");
            return Ok(Arc::clone(network));
        }

        // Re-check under the write lock: another caller may have loaded it.
        let mut cache = self.cache.write();
        if let Some(network) = cache.get(area) {
            return Ok(Arc::clone(network));
        }

        info!(area, "loading road network");
        let network = self.source.load(area).map_err(|e| match e {
            e @ SpatialError::NetworkLoad { .. } => e,
            other => SpatialError::NetworkLoad {
                area:   area.to_owned(),
                reason: other.to_string(),
            },
        })?;
        info!(
            area,
            nodes = network.node_count(),
            edges = network.edge_count(),
            "road network loaded"
        );

        let network = Arc::new(network);
        cache.insert(area.to_owned(), Arc::clone(&network));
        Ok(network)
    }

    /// Drop the cached network for `area`.  Returns `true` if one was cached.
    ///
    /// Holders of an earlier `Arc` keep their copy; the next `get` reloads.
    pub fn invalidate(&self, area: &str) -> bool {
        let removed = self.cache.write().remove(area).is_some();
        if removed {
            info!(area, "road network invalidated");
        }
        removed
    }

    /// Drop every cached network.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// `true` if `area` is currently cached.
    pub fn is_cached(&self, area: &str) -> bool {
        self.cache.read().contains_key(area)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
