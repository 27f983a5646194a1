//! The `SpeedSource` trait and the constant-speed implementation.

use tracing::warn;

use ed_core::GeoPoint;

use crate::TrafficResult;

/// Current road speed near a coordinate.
///
/// One call is one lookup: implementations do not retry, back off, or cache.
pub trait SpeedSource: Send + Sync {
    /// Current speed in km/h near `at`.
    fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64>;

    /// Best-effort variant of [`current_speed`](Self::current_speed).
    ///
    /// Any failure is logged and reported as `None` ("speed unknown").
    fn speed_or_unknown(&self, at: GeoPoint) -> Option<f64> {
        match self.current_speed(at) {
            Ok(kmh) => Some(kmh),
            Err(e) => {
                warn!(%at, error = %e, "traffic speed unavailable");
                None
            }
        }
    }
}

impl<S: SpeedSource + ?Sized> SpeedSource for &S {
    fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64> {
        (**self).current_speed(at)
    }
}

impl<S: SpeedSource + ?Sized> SpeedSource for Box<S> {
    fn current_speed(&self, at: GeoPoint) -> TrafficResult<f64> {
        (**self).current_speed(at)
    }
}

/// The same speed everywhere.  Used for offline runs and as a test double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpeed(pub f64);

impl SpeedSource for FixedSpeed {
    fn current_speed(&self, _at: GeoPoint) -> TrafficResult<f64> {
        Ok(self.0)
    }
}
