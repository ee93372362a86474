//! Route planning errors.

use crate::domain::ListingId;

/// Errors from route building and itinerary assembly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Ordering is meaningless with zero or one stop
    #[error("route needs at least 2 stops, got {got}")]
    InsufficientStops { got: usize },

    /// Waypoint positions did not run 1..=n contiguously
    #[error("waypoint positions must run 1..n without gaps")]
    BrokenSequence,

    /// The same listing appeared twice in one route
    #[error("listing {0} appears more than once in the route")]
    DuplicateStop(ListingId),

    /// Waypoint arrivals moved backwards in time
    #[error("waypoint arrivals must not move backwards in time")]
    ArrivalsOutOfOrder,

    /// A dwell, leg, or arrival left the representable time range
    #[error("itinerary times exceed the supported range")]
    TimeOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouteError::InsufficientStops { got: 1 };
        assert_eq!(err.to_string(), "route needs at least 2 stops, got 1");

        let err = RouteError::BrokenSequence;
        assert_eq!(
            err.to_string(),
            "waypoint positions must run 1..n without gaps"
        );

        let id = ListingId::parse("sale-7").unwrap();
        let err = RouteError::DuplicateStop(id);
        assert_eq!(
            err.to_string(),
            "listing sale-7 appears more than once in the route"
        );

        let err = RouteError::ArrivalsOutOfOrder;
        assert_eq!(
            err.to_string(),
            "waypoint arrivals must not move backwards in time"
        );

        let err = RouteError::TimeOverflow;
        assert_eq!(err.to_string(), "itinerary times exceed the supported range");
    }
}
