//! Itinerary scheduling: attach a clock to an ordered route.

use chrono::Duration;

use crate::domain::{ClockTime, Coordinate};

use super::config::RouteConfig;
use super::error::RouteError;
use super::itinerary::{Itinerary, RouteStop, RouteWaypoint};
use super::optimize::optimize;

/// Walk an ordered route once, assigning arrival times.
///
/// The first stop is reached at `depart` with a zero-length leg; each
/// later stop is reached after the previous stop's dwell plus the leg's
/// travel time. Travel time is `ceil(leg_km * pace)` minutes of
/// straight-line driving (see [`RouteConfig`]), so kerbside reality
/// will vary.
///
/// # Errors
///
/// [`RouteError::InsufficientStops`] for a route of fewer than two
/// stops, [`RouteError::TimeOverflow`] when a dwell, a leg, or the
/// running clock leaves the representable time range, and any shape
/// error [`Itinerary::new`] reports.
pub fn schedule(
    route: &[RouteStop],
    start: Coordinate,
    depart: ClockTime,
    config: &RouteConfig,
) -> Result<Itinerary, RouteError> {
    if route.len() < 2 {
        return Err(RouteError::InsufficientStops { got: route.len() });
    }

    let dwell = config.dwell().ok_or(RouteError::TimeOverflow)?;
    let mut waypoints = Vec::with_capacity(route.len());
    let mut clock = depart;
    let mut here = start;

    for (index, stop) in route.iter().enumerate() {
        let (leg_distance_km, leg_duration) = if index == 0 {
            (0.0, Duration::zero())
        } else {
            let km = here.distance_km(stop.location);
            let leg = config.leg_duration(km).ok_or(RouteError::TimeOverflow)?;
            (km, leg)
        };

        if index > 0 {
            // Leave the previous stop after its dwell, then drive.
            clock = clock
                .checked_add(dwell)
                .and_then(|t| t.checked_add(leg_duration))
                .ok_or(RouteError::TimeOverflow)?;
        }

        waypoints.push(RouteWaypoint {
            listing_id: stop.id.clone(),
            position: (index + 1) as u32,
            location: stop.location,
            arrival: clock,
            leg_distance_km,
            leg_duration,
        });

        here = stop.location;
    }

    Itinerary::new(start, waypoints, dwell)
}

/// Order a shortlist of stops and schedule the result in one call.
pub fn plan(
    start: Coordinate,
    stops: &[RouteStop],
    depart: ClockTime,
    config: &RouteConfig,
) -> Result<Itinerary, RouteError> {
    let route = optimize(start, stops, config)?;
    schedule(&route, start, depart, config)
}
