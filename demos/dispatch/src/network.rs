//! Synthetic road grid used when no OSM extract is configured.
//!
//! A regular lattice of two-way streets over a city's bounding box, with
//! edge length the haversine distance between neighbouring intersections.
//! Coarse, but it routes like a street grid and needs no download.

use ed_core::GeoPoint;
use ed_spatial::{NetworkSource, RoadNetwork, RoadNetworkBuilder, SpatialError, SpatialResult};

/// Grid spacing in degrees (≈ 550 m north–south).
const STEP_DEG: f64 = 0.005;

/// `(area, south-west corner, north-east corner)` of every area the grid covers.
const AREAS: &[(&str, (f64, f64), (f64, f64))] = &[
    ("Mumbai, India", (18.90, 72.80), (19.25, 72.98)),
];

/// [`NetworkSource`] that lays a street grid over a known bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGrid;

impl NetworkSource for SyntheticGrid {
    fn load(&self, area: &str) -> SpatialResult<RoadNetwork> {
        let &(_, sw, ne) = AREAS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(area.trim()))
            .ok_or_else(|| SpatialError::NetworkLoad {
                area:   area.to_owned(),
                reason: "no synthetic grid for this area; pass --pbf-dir with an extract".into(),
            })?;
        Ok(build_grid(GeoPoint::new(sw.0, sw.1), GeoPoint::new(ne.0, ne.1)))
    }
}

/// Build a grid of `STEP_DEG` cells spanning `sw`..`ne`.
pub fn build_grid(sw: GeoPoint, ne: GeoPoint) -> RoadNetwork {
    let rows = ((ne.lat - sw.lat) / STEP_DEG).round() as usize + 1;
    let cols = ((ne.lon - sw.lon) / STEP_DEG).round() as usize + 1;

    let mut b = RoadNetworkBuilder::with_capacity(rows * cols, rows * cols * 4);
    let mut ids = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let pos = GeoPoint::new(sw.lat + r as f64 * STEP_DEG, sw.lon + c as f64 * STEP_DEG);
            ids.push(b.add_node(pos));
        }
    }

    for r in 0..rows {
        for c in 0..cols {
            let here = ids[r * cols + c];
            if c + 1 < cols {
                b.add_straight_road(here, ids[r * cols + c + 1]);
            }
            if r + 1 < rows {
                b.add_straight_road(here, ids[(r + 1) * cols + c]);
            }
        }
    }
    b.build()
}

#[cfg(test)]
mod tests {
    use ed_spatial::{DijkstraRouter, Router};

    use super::*;

    #[test]
    fn grid_shape() {
        let net = build_grid(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.01, 0.02));
        // 3 rows × 5 cols, (3·4 + 2·5) two-way streets.
        assert_eq!(net.node_count(), 15);
        assert_eq!(net.edge_count(), 2 * (3 * 4 + 2 * 5));
    }

    #[test]
    fn mumbai_routes_between_fleet_and_incident() {
        let net = SyntheticGrid.load("Mumbai, India").unwrap();
        let from = net.nearest_node(GeoPoint::new(19.0913, 72.8549)).unwrap();
        let to = net.nearest_node(GeoPoint::new(19.0760, 72.8777)).unwrap();
        let route = DijkstraRouter.route(&net, from, to).unwrap();
        assert!(route.length_km() > 2.0 && route.length_km() < 6.0);
    }

    #[test]
    fn unknown_area_is_a_load_error() {
        let err = SyntheticGrid.load("Atlantis").err().unwrap();
        assert!(matches!(err, SpatialError::NetworkLoad { .. }));
    }
}
