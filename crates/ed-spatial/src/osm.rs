//! Road networks from OpenStreetMap PBF extracts (feature `osm`).
//!
//! # Usage
//!
//! ```ignore
//! use ed_spatial::{NetworkProvider, osm::PbfDirectory};
//!
//! let provider = NetworkProvider::new(PbfDirectory::new("maps"));
//! let network = provider.get("Mumbai, India")?; // reads maps/mumbai-india.osm.pbf
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways are kept (see [`is_drivable`]).  One-way
//! roads add a single directed edge; two-way roads add both directions.  Edge
//! length is the haversine distance between consecutive way nodes.

use std::path::{Path, PathBuf};

use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use ed_core::{GeoPoint, NodeId};

use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::provider::NetworkSource;
use crate::{SpatialError, SpatialResult};

// ── Area → file resolution ────────────────────────────────────────────────────

/// A directory of `<slug>.osm.pbf` extracts, one per area name.
#[derive(Debug, Clone)]
pub struct PbfDirectory {
    dir: PathBuf,
}

impl PbfDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the extract that serves `area`.
    pub fn path_for(&self, area: &str) -> PathBuf {
        self.dir.join(format!("{}.osm.pbf", area_slug(area)))
    }
}

impl NetworkSource for PbfDirectory {
    fn load(&self, area: &str) -> SpatialResult<RoadNetwork> {
        let path = self.path_for(area);
        if !path.is_file() {
            return Err(SpatialError::NetworkLoad {
                area:   area.to_owned(),
                reason: format!("no extract at {}", path.display()),
            });
        }
        load_from_pbf(&path)
    }
}

/// Lowercase `area` and join its alphanumeric runs with `-`
/// (`"Mumbai, India"` → `"mumbai-india"`).
pub fn area_slug(area: &str) -> String {
    area.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load a drivable road network from an OSM PBF file.
///
/// # Errors
///
/// [`SpatialError::Osm`] if the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> SpatialResult<RoadNetwork> {
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .map(|(_, v)| *v);

                if let Some(highway) = highway.filter(|h| is_drivable(h)) {
                    road_ways.push(OsmWay {
                        refs:   w.refs().collect(),
                        oneway: is_oneway(highway, &tags),
                    });
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    let road_node_ids: FxHashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    let mut osm_to_ed: FxHashMap<i64, NodeId> = FxHashMap::default();
    osm_to_ed.reserve(road_node_ids.len());

    // Sorted so NodeIds are reproducible across runs.
    let mut ordered: Vec<i64> = road_node_ids.into_iter().collect();
    ordered.sort_unstable();
    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            osm_to_ed.insert(osm_id, builder.add_node(pos));
        }
    }
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            if let (Some(&from), Some(&to)) =
                (osm_to_ed.get(&window[0]), osm_to_ed.get(&window[1]))
            {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to));
                builder.add_directed_edge(from, to, len_m);
                if !way.oneway {
                    builder.add_directed_edge(to, from, len_m);
                }
            }
        }
    }

    debug!(
        path = %path.display(),
        ways = road_ways.len(),
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "drivable ways converted"
    );
    Ok(builder.build())
}

struct OsmWay {
    refs:   Vec<i64>,
    oneway: bool,
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// `true` if a `highway=*` value is drivable by car.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction" | "elevator"
    )
}

/// Motorways are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags.iter().any(|(k, v)| {
        *k == "oneway" && matches!(*v, "yes" | "1" | "true")
    });
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
