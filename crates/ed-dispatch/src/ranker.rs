//! Fleet-wide ETA comparison.
//!
//! # Per-vehicle pipeline
//!
//! ```text
//! vehicle pos ──nearest_node──┐
//!                             ├─ Router::route ─ length_km ─┐
//! incident pos ─nearest_node──┘                             ├─ estimate ─ EtaResult
//! vehicle pos ──SpeedSource::speed_or_unknown ── speed ─────┘
//! ```
//!
//! Vehicles are processed one after another on the calling thread.  A failure
//! in one vehicle's pipeline only degrades that vehicle's [`EtaResult`].  The
//! traffic service is not called for a vehicle whose route failed.

use tracing::{debug, info, warn};

use ed_core::{Eta, NodeId, estimate};
use ed_fleet::{Incident, Vehicle};
use ed_spatial::{RoadNetwork, Router};
use ed_traffic::SpeedSource;

use crate::result::{EtaResult, EtaStatus, Ranking};

/// Ranks a fleet by ETA to an incident over one road network.
pub struct DispatchRanker<'n, R: Router, S: SpeedSource> {
    network: &'n RoadNetwork,
    router:  R,
    speeds:  S,
}

impl<'n, R: Router, S: SpeedSource> DispatchRanker<'n, R, S> {
    pub fn new(network: &'n RoadNetwork, router: R, speeds: S) -> Self {
        Self { network, router, speeds }
    }

    /// Estimate every vehicle and return them ascending by ETA.
    ///
    /// Always yields exactly one result per vehicle.  Unreachable vehicles
    /// sort after all reachable ones, in roster order.
    pub fn rank(&self, vehicles: &[Vehicle], incident: Incident) -> Ranking {
        let incident_node = self
            .network
            .nearest_node(incident.pos)
            .map_err(|e| e.to_string());
        if let Err(why) = &incident_node {
            warn!(incident = %incident.pos, %why, "incident could not be snapped");
        }

        let results: Vec<EtaResult> = vehicles
            .iter()
            .map(|v| self.estimate_with(v, incident_node.as_ref().copied()))
            .collect();

        let ranking = Ranking::from_results(results);
        info!(
            vehicles = ranking.len(),
            reachable = ranking.reachable_count(),
            best = ranking.best().map(|r| r.vehicle.as_str()).unwrap_or("-"),
            "dispatch ranking complete"
        );
        ranking
    }

    /// ETA of a single vehicle to `incident`.
    pub fn estimate(&self, vehicle: &Vehicle, incident: Incident) -> EtaResult {
        let incident_node = self
            .network
            .nearest_node(incident.pos)
            .map_err(|e| e.to_string());
        self.estimate_with(vehicle, incident_node.as_ref().copied())
    }

    fn estimate_with(&self, vehicle: &Vehicle, incident_node: Result<NodeId, &String>) -> EtaResult {
        let degraded = |status: EtaStatus| EtaResult {
            vehicle:     vehicle.name.clone(),
            eta:         Eta::Unreachable,
            speed_kmh:   None,
            distance_km: None,
            status,
        };

        let to = match incident_node {
            Ok(n) => n,
            Err(why) => return degraded(EtaStatus::NoNode(format!("incident: {why}"))),
        };
        let from = match self.network.nearest_node(vehicle.pos) {
            Ok(n) => n,
            Err(e) => {
                warn!(vehicle = %vehicle.name, error = %e, "vehicle could not be snapped");
                return degraded(EtaStatus::NoNode(e.to_string()));
            }
        };
        let route = match self.router.route(self.network, from, to) {
            Ok(r) => r,
            Err(e) => {
                warn!(vehicle = %vehicle.name, error = %e, "no route to incident");
                return degraded(EtaStatus::NoRoute(e.to_string()));
            }
        };
        let distance_km = route.length_km();

        let speed_kmh = self.speeds.speed_or_unknown(vehicle.pos);
        let (eta, status) = match speed_kmh {
            None => (Eta::Unreachable, EtaStatus::NoSpeedData),
            Some(kmh) => match estimate(distance_km, kmh) {
                Eta::Unreachable => (Eta::Unreachable, EtaStatus::Stopped),
                eta => (eta, EtaStatus::Ok),
            },
        };

        if status.is_ok() {
            debug!(
                vehicle = %vehicle.name,
                %eta,
                distance_km,
                speed_kmh,
                route_nodes = route.nodes.len(),
                "vehicle estimated"
            );
        } else {
            warn!(vehicle = %vehicle.name, distance_km, status = %status, "vehicle degraded");
        }

        EtaResult {
            vehicle: vehicle.name.clone(),
            eta,
            speed_kmh,
            distance_km: Some(distance_km),
            status,
        }
    }
}
