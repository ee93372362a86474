//! Route planning configuration.

use chrono::Duration;

/// Configuration parameters for route building and scheduling.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Time budgeted at each stop before driving on (minutes).
    pub dwell_mins: i64,

    /// Driving minutes per straight-line kilometre.
    ///
    /// Leg travel time is `ceil(distance_km * pace)`. There is no road
    /// network behind this estimate.
    pub pace_mins_per_km: f64,

    /// Practical cap on stops per route.
    ///
    /// The nearest-neighbour scan is O(n²), so routes past this size
    /// are logged and served anyway rather than rejected.
    pub max_stops: usize,
}

impl RouteConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(dwell_mins: i64, pace_mins_per_km: f64, max_stops: usize) -> Self {
        Self {
            dwell_mins,
            pace_mins_per_km,
            max_stops,
        }
    }

    /// Returns the per-stop dwell as a Duration.
    ///
    /// `None` when `dwell_mins` lies outside chrono's duration range.
    pub fn dwell(&self) -> Option<Duration> {
        Duration::try_minutes(self.dwell_mins)
    }

    /// Travel time for a leg of `distance_km`, rounded up to whole
    /// minutes.
    ///
    /// `None` when the product is not a representable duration.
    pub fn leg_duration(&self, distance_km: f64) -> Option<Duration> {
        let mins = (distance_km * self.pace_mins_per_km).ceil();
        if !mins.is_finite() {
            return None;
        }
        Duration::try_minutes(mins as i64)
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            dwell_mins: 30,
            pace_mins_per_km: 3.0,
            max_stops: 20,
        }
    }
}
