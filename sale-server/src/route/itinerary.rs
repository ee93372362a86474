//! Itinerary types: an ordered route with timing attached.

use std::collections::HashSet;

use chrono::Duration;

use crate::domain::{ClockTime, Coordinate, Listing, ListingId};

use super::error::RouteError;

/// A stop a route can visit: an identity and a position.
///
/// This is all the optimizer and scheduler need to know about a sale.
/// A full [`Listing`] converts via `From`, and route requests that
/// carry only ids and coordinates build these directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    /// The listing this stop visits
    pub id: ListingId,
    /// Where it is
    pub location: Coordinate,
}

impl RouteStop {
    pub fn new(id: ListingId, location: Coordinate) -> Self {
        Self { id, location }
    }
}

impl From<&Listing> for RouteStop {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            location: listing.location,
        }
    }
}

/// One scheduled stop on a finished itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteWaypoint {
    /// The listing this stop visits
    pub listing_id: ListingId,
    /// 1-based position in visit order
    pub position: u32,
    /// Where the stop is
    pub location: Coordinate,
    /// Estimated arrival at this stop
    pub arrival: ClockTime,
    /// Straight-line distance from the previous point in km; zero for
    /// the first stop
    pub leg_distance_km: f64,
    /// Estimated travel time from the previous point; zero for the
    /// first stop
    pub leg_duration: Duration,
}

/// A fully scheduled route.
///
/// Construction validates shape: at least two stops, positions running
/// 1..=n, no repeated listings, arrivals never moving backwards.
/// Accessors lean on those invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    start: Coordinate,
    waypoints: Vec<RouteWaypoint>,
    dwell: Duration,
}

impl Itinerary {
    /// Assemble an itinerary, checking the waypoint sequence.
    pub fn new(
        start: Coordinate,
        waypoints: Vec<RouteWaypoint>,
        dwell: Duration,
    ) -> Result<Self, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::InsufficientStops {
                got: waypoints.len(),
            });
        }

        for (i, waypoint) in waypoints.iter().enumerate() {
            if waypoint.position as usize != i + 1 {
                return Err(RouteError::BrokenSequence);
            }
        }

        let mut seen = HashSet::new();
        for waypoint in &waypoints {
            if !seen.insert(waypoint.listing_id.clone()) {
                return Err(RouteError::DuplicateStop(waypoint.listing_id.clone()));
            }
        }

        for window in waypoints.windows(2) {
            if window[1].arrival < window[0].arrival {
                return Err(RouteError::ArrivalsOutOfOrder);
            }
        }

        Ok(Self {
            start,
            waypoints,
            dwell,
        })
    }

    /// The scheduled stops in visit order.
    pub fn waypoints(&self) -> &[RouteWaypoint] {
        &self.waypoints
    }

    /// Where the trip begins.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Where the trip ends: the last stop.
    pub fn end(&self) -> Coordinate {
        // Safe: validated non-empty at construction
        self.waypoints.last().unwrap().location
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.waypoints.len()
    }

    /// The per-stop dwell this itinerary was scheduled with.
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Total driving distance over all legs, in km.
    pub fn total_distance_km(&self) -> f64 {
        self.waypoints.iter().map(|w| w.leg_distance_km).sum()
    }

    /// Total trip time: driving plus a dwell at every stop.
    pub fn total_duration(&self) -> Duration {
        let driving: Duration = self.waypoints.iter().map(|w| w.leg_duration).sum();
        driving + self.dwell * self.waypoints.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> ClockTime {
        ClockTime::new(day(), NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn waypoint(id: &str, position: u32, lon: f64, arrival: ClockTime) -> RouteWaypoint {
        RouteWaypoint {
            listing_id: ListingId::parse(id).unwrap(),
            position,
            location: Coordinate::new(0.0, lon).unwrap(),
            arrival,
            leg_distance_km: if position == 1 { 0.0 } else { 10.0 },
            leg_duration: if position == 1 {
                Duration::zero()
            } else {
                Duration::minutes(30)
            },
        }
    }

    fn start() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn accepts_a_well_formed_sequence() {
        let waypoints = vec![
            waypoint("a", 1, 0.1, at(9, 0)),
            waypoint("b", 2, 0.2, at(10, 0)),
            waypoint("c", 3, 0.3, at(11, 0)),
        ];
        let itinerary = Itinerary::new(start(), waypoints, Duration::minutes(30)).unwrap();

        assert_eq!(itinerary.stop_count(), 3);
        assert_eq!(itinerary.start(), start());
        assert_eq!(itinerary.end(), Coordinate::new(0.0, 0.3).unwrap());
    }

    #[test]
    fn rejects_fewer_than_two_stops() {
        let result = Itinerary::new(start(), vec![], Duration::minutes(30));
        assert_eq!(result, Err(RouteError::InsufficientStops { got: 0 }));

        let one = vec![waypoint("a", 1, 0.1, at(9, 0))];
        let result = Itinerary::new(start(), one, Duration::minutes(30));
        assert_eq!(result, Err(RouteError::InsufficientStops { got: 1 }));
    }

    #[test]
    fn rejects_gapped_or_misnumbered_positions() {
        let gapped = vec![
            waypoint("a", 1, 0.1, at(9, 0)),
            waypoint("b", 3, 0.2, at(10, 0)),
        ];
        assert_eq!(
            Itinerary::new(start(), gapped, Duration::minutes(30)),
            Err(RouteError::BrokenSequence)
        );

        let zero_based = vec![
            waypoint("a", 0, 0.1, at(9, 0)),
            waypoint("b", 1, 0.2, at(10, 0)),
        ];
        assert_eq!(
            Itinerary::new(start(), zero_based, Duration::minutes(30)),
            Err(RouteError::BrokenSequence)
        );
    }

    #[test]
    fn rejects_duplicate_listings() {
        let doubled = vec![
            waypoint("a", 1, 0.1, at(9, 0)),
            waypoint("a", 2, 0.2, at(10, 0)),
        ];
        let result = Itinerary::new(start(), doubled, Duration::minutes(30));
        assert_eq!(
            result,
            Err(RouteError::DuplicateStop(ListingId::parse("a").unwrap()))
        );
    }

    #[test]
    fn rejects_backwards_arrivals() {
        let backwards = vec![
            waypoint("a", 1, 0.1, at(10, 0)),
            waypoint("b", 2, 0.2, at(9, 0)),
        ];
        assert_eq!(
            Itinerary::new(start(), backwards, Duration::minutes(30)),
            Err(RouteError::ArrivalsOutOfOrder)
        );
    }

    #[test]
    fn equal_arrivals_are_allowed() {
        // Two stops on the same corner can share an arrival minute.
        let same_minute = vec![
            waypoint("a", 1, 0.1, at(9, 0)),
            waypoint("b", 2, 0.1, at(9, 0)),
        ];
        assert!(Itinerary::new(start(), same_minute, Duration::minutes(30)).is_ok());
    }

    #[test]
    fn totals_add_up() {
        let waypoints = vec![
            waypoint("a", 1, 0.1, at(9, 0)),
            waypoint("b", 2, 0.2, at(10, 0)),
            waypoint("c", 3, 0.3, at(11, 0)),
        ];
        let itinerary = Itinerary::new(start(), waypoints, Duration::minutes(30)).unwrap();

        // Legs: 0 + 10 + 10 km
        assert!((itinerary.total_distance_km() - 20.0).abs() < 1e-9);

        // Driving: 0 + 30 + 30 mins; dwell: 3 stops of 30 mins
        assert_eq!(
            itinerary.total_duration(),
            Duration::minutes(60) + Duration::minutes(90)
        );
    }

    #[test]
    fn listing_converts_to_stop() {
        use crate::domain::{ListingStatus, SaleHours, UserId};

        let listing = Listing {
            id: ListingId::parse("sale-5").unwrap(),
            title: "Garage sale".to_string(),
            description: String::new(),
            address: "1 Main St".to_string(),
            location: Coordinate::new(64.8, -147.7).unwrap(),
            sale_date: day(),
            hours: SaleHours::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            )
            .unwrap(),
            tags: vec![],
            cash_only: false,
            early_birds: false,
            status: ListingStatus::Active,
            owner: UserId::parse("u-1").unwrap(),
        };

        let stop = RouteStop::from(&listing);
        assert_eq!(stop.id, listing.id);
        assert_eq!(stop.location, listing.location);
    }
}
