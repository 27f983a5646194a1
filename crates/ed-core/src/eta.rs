//! Travel-time estimate from a route length and a current speed.
//!
//! # Ordering
//!
//! `Eta` is totally ordered: finite minutes ascend, and `Unreachable` sorts
//! after every finite value.  Two `Unreachable` values compare equal, so a
//! stable sort keeps them in roster order.  Equality is defined by the same
//! ordering, so `-0.0` and `0.0` minutes are distinct and `NaN` equals itself.

use std::cmp::Ordering;
use std::fmt;

/// Estimated time of arrival.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eta {
    /// Minutes until arrival, rounded to two decimal places.
    Minutes(f64),
    /// No usable speed, so no finite estimate exists.
    Unreachable,
}

impl Eta {
    /// Finite minutes, or `None` for [`Eta::Unreachable`].
    #[inline]
    pub fn minutes(self) -> Option<f64> {
        match self {
            Eta::Minutes(m) => Some(m),
            Eta::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Eta::Minutes(_))
    }
}

impl PartialEq for Eta {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Eta {}

impl PartialOrd for Eta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Eta {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Eta::Minutes(a), Eta::Minutes(b)) => a.total_cmp(b),
            (Eta::Minutes(_), Eta::Unreachable) => Ordering::Less,
            (Eta::Unreachable, Eta::Minutes(_)) => Ordering::Greater,
            (Eta::Unreachable, Eta::Unreachable) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Minutes(m) => write!(f, "{m:.2}"),
            Eta::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Estimate minutes to cover `distance_km` at `speed_kmh`.
///
/// `speed_kmh <= 0` (or NaN / infinite) yields [`Eta::Unreachable`] rather
/// than dividing by zero.  Finite results are rounded to two decimals.
pub fn estimate(distance_km: f64, speed_kmh: f64) -> Eta {
    if !speed_kmh.is_finite() || speed_kmh <= 0.0 || !distance_km.is_finite() {
        return Eta::Unreachable;
    }
    Eta::Minutes(round2(distance_km / speed_kmh * 60.0))
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
