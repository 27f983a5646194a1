//! Unit tests for ed-dispatch.

#[cfg(test)]
mod helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ed_core::GeoPoint;
    use ed_fleet::Vehicle;
    use ed_spatial::{RoadNetwork, RoadNetworkBuilder};
    use ed_traffic::{SpeedSource, TrafficError, TrafficResult, parse_flow_segment};

    pub const INCIDENT: GeoPoint = GeoPoint { lat: 19.0760, lon: 72.8777 };

    /// Star network: one incident node plus one spoke per entry of
    /// `spokes_km`, each joined to the incident by a two-way road of that
    /// length.  Also returns an isolated node with no roads.
    pub fn star_network(spokes_km: &[f64]) -> (RoadNetwork, Vec<GeoPoint>, GeoPoint) {
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(INCIDENT);
        let mut spokes = Vec::new();
        for (i, &km) in spokes_km.iter().enumerate() {
            let pos = GeoPoint::new(INCIDENT.lat + 0.01 * (i + 1) as f64, INCIDENT.lon);
            let n = b.add_node(pos);
            b.add_road(n, hub, km * 1_000.0);
            spokes.push(pos);
        }
        let island = GeoPoint::new(INCIDENT.lat - 0.5, INCIDENT.lon - 0.5);
        b.add_node(island);
        (b.build(), spokes, island)
    }

    pub fn fleet(positions: &[GeoPoint]) -> Vec<Vehicle> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Vehicle::new(format!("vehicle{}", i + 1), p))
            .collect()
    }

    /// What the fake traffic service answers at one position.
    pub enum Reply {
        Kmh(f64),
        Body(&'static str),
        Down,
    }

    /// Traffic double keyed by exact position; counts calls.
    pub struct ScriptedSpeeds {
        pub replies: Vec<(GeoPoint, Reply)>,
        pub calls:   AtomicUsize,
    }

    impl ScriptedSpeeds {
        pub fn new(replies: Vec<(GeoPoint, Reply)>) -> Self {
            Self { replies, calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SpeedSource for ScriptedSpeeds {
        fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.replies.iter().find(|(p, _)| *p == at).map(|(_, r)| r) {
                Some(Reply::Kmh(kmh)) => Ok(*kmh),
                Some(Reply::Body(body)) => parse_flow_segment(body).map(|s| s.current_speed_kmh),
                Some(Reply::Down) | None => Err(TrafficError::Status(503)),
            }
        }
    }
}

// ── Ranking scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod ranking {
    use ed_core::Eta;
    use ed_fleet::{Incident, Vehicle};
    use ed_spatial::{DijkstraRouter, RoadNetwork};
    use ed_traffic::FixedSpeed;

    use super::helpers::{INCIDENT, Reply, ScriptedSpeeds, fleet, star_network};
    use crate::{DispatchRanker, EtaStatus};

    fn incident() -> Incident {
        Incident::new(INCIDENT).unwrap()
    }

    #[test]
    fn single_vehicle_five_km_at_thirty() {
        let (net, spokes, _) = star_network(&[5.0]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, FixedSpeed(30.0));
        let r = ranker.estimate(&Vehicle::new("solo", spokes[0]), incident());
        assert_eq!(r.eta, Eta::Minutes(10.0));
        assert_eq!(r.speed_kmh, Some(30.0));
        assert_eq!(r.distance_km, Some(5.0));
        assert_eq!(r.status, EtaStatus::Ok);
    }

    #[test]
    fn three_vehicles_mixed_speeds() {
        let (net, spokes, _) = star_network(&[2.0, 5.0, 8.0]);
        let speeds = ScriptedSpeeds::new(vec![
            (spokes[0], Reply::Kmh(20.0)),
            (spokes[1], Reply::Kmh(40.0)),
            (spokes[2], Reply::Kmh(0.0)),
        ]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let ranking = ranker.rank(&fleet(&spokes), incident());

        let etas: Vec<Eta> = ranking.results().iter().map(|r| r.eta).collect();
        assert_eq!(etas, [Eta::Minutes(6.0), Eta::Minutes(7.5), Eta::Unreachable]);

        let order: Vec<&str> = ranking.results().iter().map(|r| r.vehicle.as_str()).collect();
        assert_eq!(order, ["vehicle1", "vehicle2", "vehicle3"]);
        assert_eq!(ranking.best().unwrap().vehicle, "vehicle1");

        let third = &ranking.results()[2];
        assert_eq!(third.status, EtaStatus::Stopped);
        assert_eq!(third.speed_kmh, Some(0.0));
        assert_eq!(third.distance_km, Some(8.0));
    }

    #[test]
    fn sorts_faster_vehicle_first_regardless_of_roster_order() {
        let (net, spokes, _) = star_network(&[9.0, 1.0]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, FixedSpeed(30.0));
        let ranking = ranker.rank(&fleet(&spokes), incident());
        assert_eq!(ranking.best().unwrap().vehicle, "vehicle2");
        assert_eq!(ranking.results()[1].vehicle, "vehicle1");
    }

    #[test]
    fn malformed_traffic_response_only_affects_that_vehicle() {
        let (net, spokes, _) = star_network(&[2.0, 5.0, 8.0]);
        let speeds = ScriptedSpeeds::new(vec![
            (spokes[0], Reply::Body("{\"flowSegmentData\": {\"currentSpeed\": 20")),
            (spokes[1], Reply::Body(r#"{"flowSegmentData":{"currentSpeed":40}}"#)),
            (spokes[2], Reply::Body(r#"{"flowSegmentData":{"currentSpeed":48}}"#)),
        ]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let ranking = ranker.rank(&fleet(&spokes), incident());

        let by_name = |n: &str| ranking.results().iter().find(|r| r.vehicle == n).unwrap();
        let broken = by_name("vehicle1");
        assert_eq!(broken.eta, Eta::Unreachable);
        assert_eq!(broken.status, EtaStatus::NoSpeedData);
        assert_eq!(broken.speed_kmh, None);
        assert_eq!(broken.distance_km, Some(2.0));

        assert_eq!(by_name("vehicle2").eta, Eta::Minutes(7.5));
        assert_eq!(by_name("vehicle3").eta, Eta::Minutes(10.0));
        assert_eq!(ranking.results().last().unwrap().vehicle, "vehicle1");
    }

    #[test]
    fn one_result_per_vehicle_whatever_fails() {
        let (net, spokes, island) = star_network(&[3.0, 4.0]);
        let mut positions = spokes.clone();
        positions.push(island);
        let speeds = ScriptedSpeeds::new(vec![(spokes[0], Reply::Down), (spokes[1], Reply::Kmh(60.0))]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let vehicles = fleet(&positions);
        let ranking = ranker.rank(&vehicles, incident());

        assert_eq!(ranking.len(), vehicles.len());
        for v in &vehicles {
            assert_eq!(ranking.results().iter().filter(|r| r.vehicle == v.name).count(), 1);
        }
        assert_eq!(ranking.reachable_count(), 1);
        assert_eq!(ranking.best_reachable().unwrap().vehicle, "vehicle2");
    }

    #[test]
    fn no_route_skips_traffic_lookup() {
        let (net, _, island) = star_network(&[3.0]);
        let speeds = ScriptedSpeeds::new(vec![(island, Reply::Kmh(50.0))]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let r = ranker.estimate(&Vehicle::new("stranded", island), incident());

        assert!(matches!(r.status, EtaStatus::NoRoute(_)));
        assert_eq!(r.eta, Eta::Unreachable);
        assert_eq!(r.distance_km, None);
        assert_eq!(r.speed_kmh, None);
        assert_eq!(speeds.calls(), 0);
    }

    #[test]
    fn empty_network_degrades_every_vehicle() {
        let net = RoadNetwork::empty();
        let (_, spokes, _) = star_network(&[1.0, 2.0]);
        let speeds = ScriptedSpeeds::new(vec![]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let ranking = ranker.rank(&fleet(&spokes), incident());

        assert_eq!(ranking.len(), 2);
        assert!(ranking.results().iter().all(|r| matches!(r.status, EtaStatus::NoNode(_))));
        assert!(ranking.best_reachable().is_none());
        // Still reports a first entry.
        assert_eq!(ranking.best().unwrap().vehicle, "vehicle1");
        assert_eq!(speeds.calls(), 0);
    }

    #[test]
    fn unreachable_ties_keep_roster_order() {
        let (net, spokes, _) = star_network(&[1.0, 2.0, 3.0, 4.0]);
        let speeds = ScriptedSpeeds::new(vec![
            (spokes[0], Reply::Down),
            (spokes[1], Reply::Kmh(30.0)),
            (spokes[2], Reply::Kmh(0.0)),
            (spokes[3], Reply::Down),
        ]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, &speeds);
        let ranking = ranker.rank(&fleet(&spokes), incident());
        let order: Vec<&str> = ranking.results().iter().map(|r| r.vehicle.as_str()).collect();
        assert_eq!(order, ["vehicle2", "vehicle1", "vehicle3", "vehicle4"]);
    }

    #[test]
    fn vehicle_at_incident_is_zero_minutes() {
        let (net, _, _) = star_network(&[1.0]);
        let ranker = DispatchRanker::new(&net, DijkstraRouter, FixedSpeed(25.0));
        let r = ranker.estimate(&Vehicle::new("on scene", INCIDENT), incident());
        assert_eq!(r.eta, Eta::Minutes(0.0));
        assert_eq!(r.distance_km, Some(0.0));
    }
}

// ── Ranking type ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ranking_type {
    use ed_core::Eta;

    use crate::{EtaResult, EtaStatus, Ranking};

    fn result(name: &str, eta: Eta) -> EtaResult {
        EtaResult {
            vehicle:     name.into(),
            eta,
            speed_kmh:   None,
            distance_km: None,
            status:      if eta.is_reachable() { EtaStatus::Ok } else { EtaStatus::NoSpeedData },
        }
    }

    #[test]
    fn sorted_ascending_with_unreachable_last() {
        let ranking = Ranking::from_results(vec![
            result("a", Eta::Unreachable),
            result("b", Eta::Minutes(12.0)),
            result("c", Eta::Minutes(3.25)),
            result("d", Eta::Unreachable),
            result("e", Eta::Minutes(3.25)),
        ]);
        let order: Vec<&str> = ranking.results().iter().map(|r| r.vehicle.as_str()).collect();
        assert_eq!(order, ["c", "e", "b", "a", "d"]);
        for pair in ranking.results().windows(2) {
            assert!(pair[0].eta <= pair[1].eta);
        }
    }

    #[test]
    fn legacy_zero_encoding() {
        let r = result("x", Eta::Unreachable);
        assert_eq!(r.speed_or_zero(), 0.0);
        assert_eq!(r.distance_or_zero(), 0.0);
    }

    #[test]
    fn empty_ranking() {
        let ranking = Ranking::default();
        assert!(ranking.is_empty());
        assert!(ranking.best().is_none());
        assert!(ranking.best_reachable().is_none());
    }

    #[test]
    fn status_labels() {
        assert_eq!(EtaStatus::Ok.to_string(), "ok");
        assert_eq!(EtaStatus::NoSpeedData.to_string(), "no-speed-data");
        assert_eq!(EtaStatus::NoRoute("x".into()).to_string(), "no-route: x");
        assert_eq!(EtaStatus::Stopped.as_str(), "stopped");
    }
}
