//! Per-vehicle outcome of a dispatch run.

use std::fmt;

use ed_core::Eta;

/// Why an [`EtaResult`] has the ETA it has.
///
/// Every degraded case is distinguishable, so "confirmed far away" never
/// looks the same as "data unavailable".
#[derive(Debug, Clone, PartialEq)]
pub enum EtaStatus {
    /// Route and live speed both known.
    Ok,
    /// The traffic service reported a speed of 0 (standstill).
    Stopped,
    /// Route known, speed unavailable.
    NoSpeedData,
    /// The vehicle or incident could not be snapped to a road node.
    NoNode(String),
    /// No path joins the vehicle's node to the incident's node.
    NoRoute(String),
}

impl EtaStatus {
    /// Short label for tables and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            EtaStatus::Ok          => "ok",
            EtaStatus::Stopped     => "stopped",
            EtaStatus::NoSpeedData => "no-speed-data",
            EtaStatus::NoNode(_)   => "no-node",
            EtaStatus::NoRoute(_)  => "no-route",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, EtaStatus::Ok)
    }
}

impl fmt::Display for EtaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtaStatus::NoNode(why) | EtaStatus::NoRoute(why) => {
                write!(f, "{}: {why}", self.as_str())
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

/// ETA of one vehicle to the incident.
#[derive(Debug, Clone, PartialEq)]
pub struct EtaResult {
    pub vehicle:     String,
    pub eta:         Eta,
    /// Live speed at the vehicle, km/h.  `None` when unknown or never fetched.
    pub speed_kmh:   Option<f64>,
    /// Shortest-path length, km.  `None` when no route was found.
    pub distance_km: Option<f64>,
    pub status:      EtaStatus,
}

impl EtaResult {
    /// Speed with unknown reported as `0`, the legacy table encoding.
    pub fn speed_or_zero(&self) -> f64 {
        self.speed_kmh.unwrap_or(0.0)
    }

    /// Distance with unknown reported as `0`, the legacy table encoding.
    pub fn distance_or_zero(&self) -> f64 {
        self.distance_km.unwrap_or(0.0)
    }
}

/// Results for a whole fleet, ascending by ETA.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    results: Vec<EtaResult>,
}

impl Ranking {
    /// Sort `results` into ranking order.
    ///
    /// The sort is stable: equal ETAs (including every `Unreachable`) keep
    /// the order they were given in.
    pub fn from_results(mut results: Vec<EtaResult>) -> Self {
        results.sort_by(|a, b| a.eta.cmp(&b.eta));
        Self { results }
    }

    pub fn results(&self) -> &[EtaResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<EtaResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The first-ranked vehicle.  Reported even when it is unreachable;
    /// check [`EtaResult::eta`] or use [`best_reachable`](Self::best_reachable).
    pub fn best(&self) -> Option<&EtaResult> {
        self.results.first()
    }

    /// The first-ranked vehicle with a finite ETA.
    pub fn best_reachable(&self) -> Option<&EtaResult> {
        self.results.first().filter(|r| r.eta.is_reachable())
    }

    pub fn reachable_count(&self) -> usize {
        self.results.iter().filter(|r| r.eta.is_reachable()).count()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a EtaResult;
    type IntoIter = std::slice::Iter<'a, EtaResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
