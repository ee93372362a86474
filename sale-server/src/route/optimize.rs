//! Nearest-neighbour route ordering.
//!
//! Greedy and O(n²): from the start point, repeatedly drive to the
//! closest unvisited sale. The tour is not guaranteed to be globally
//! shortest; for the handful of stops a morning of garage sales
//! involves, the greedy order is close enough and instant. Callers who
//! need optimality need a different tool.

use tracing::{trace, warn};

use crate::domain::Coordinate;

use super::config::RouteConfig;
use super::error::RouteError;
use super::itinerary::RouteStop;

/// Order `stops` for visiting, starting from `start`.
///
/// Returns a permutation of the input. Each hop goes to the nearest
/// unvisited stop by great-circle distance; when two stops are exactly
/// equidistant, the one appearing earlier in the input wins, so the
/// same input always yields the same route.
///
/// Routes larger than [`RouteConfig::max_stops`] are served anyway;
/// the cap is advisory and oversized requests are logged.
///
/// # Errors
///
/// [`RouteError::InsufficientStops`] when fewer than two stops are
/// given; ordering one stop is meaningless and the caller should not
/// offer it.
pub fn optimize(
    start: Coordinate,
    stops: &[RouteStop],
    config: &RouteConfig,
) -> Result<Vec<RouteStop>, RouteError> {
    if stops.len() < 2 {
        return Err(RouteError::InsufficientStops { got: stops.len() });
    }

    if stops.len() > config.max_stops {
        warn!(
            stops = stops.len(),
            cap = config.max_stops,
            "route request exceeds the configured stop cap"
        );
    }

    let mut visited = vec![false; stops.len()];
    let mut order = Vec::with_capacity(stops.len());
    let mut current = start;

    for _ in 0..stops.len() {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in stops.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let distance = current.distance_km(candidate.location);
            // Strict < keeps the earlier candidate on exact ties.
            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((index, distance));
            }
        }

        let Some((index, distance)) = best else {
            break;
        };

        trace!(
            stop = %stops[index].id,
            leg_km = distance,
            "nearest-neighbour hop"
        );

        visited[index] = true;
        order.push(stops[index].clone());
        current = stops[index].location;
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use crate::domain::ListingId;

    use super::*;

    fn stop(id: &str, lat: f64, lon: f64) -> RouteStop {
        RouteStop::new(
            ListingId::parse(id).unwrap(),
            Coordinate::new(lat, lon).unwrap(),
        )
    }

    fn ids(stops: &[RouteStop]) -> Vec<&str> {
        stops.iter().map(|s| s.id.as_str()).collect()
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn rejects_zero_and_one_stop() {
        let config = RouteConfig::default();

        let result = optimize(origin(), &[], &config);
        assert_eq!(result, Err(RouteError::InsufficientStops { got: 0 }));

        let one = vec![stop("a", 0.0, 1.0)];
        let result = optimize(origin(), &one, &config);
        assert_eq!(result, Err(RouteError::InsufficientStops { got: 1 }));
    }

    #[test]
    fn greedy_orders_by_proximity() {
        let config = RouteConfig::default();
        let stops = vec![
            stop("far", 0.0, 3.0),
            stop("near", 0.0, 1.0),
            stop("mid", 0.0, 2.0),
        ];

        let route = optimize(origin(), &stops, &config).unwrap();
        assert_eq!(ids(&route), ["near", "mid", "far"]);
    }

    #[test]
    fn equidistant_stops_resolve_in_input_order() {
        let config = RouteConfig::default();
        // B and C sit symmetric about the start: one degree east and
        // one degree north are the same great-circle distance.
        let b = stop("b", 0.0, 1.0);
        let c = stop("c", 1.0, 0.0);

        let route = optimize(origin(), &[b.clone(), c.clone()], &config).unwrap();
        assert_eq!(ids(&route), ["b", "c"]);

        // Swap the input and the route follows.
        let route = optimize(origin(), &[c, b], &config).unwrap();
        assert_eq!(ids(&route), ["c", "b"]);
    }

    #[test]
    fn result_is_a_permutation_of_the_input() {
        let config = RouteConfig::default();
        let stops = vec![
            stop("a", 0.5, 0.5),
            stop("b", -0.5, 1.0),
            stop("c", 1.0, -1.0),
            stop("d", 0.1, 0.1),
        ];

        let route = optimize(origin(), &stops, &config).unwrap();

        let mut input_ids = ids(&stops);
        let mut route_ids = ids(&route);
        input_ids.sort();
        route_ids.sort();
        assert_eq!(input_ids, route_ids);
    }

    #[test]
    fn first_hop_is_the_nearest_stop() {
        let config = RouteConfig::default();
        let stops = vec![
            stop("a", 2.0, 2.0),
            stop("b", 0.1, 0.1),
            stop("c", -1.0, 1.0),
        ];

        let route = optimize(origin(), &stops, &config).unwrap();
        assert_eq!(route[0].id.as_str(), "b");
    }

    #[test]
    fn clustered_stops_are_visited_consecutively() {
        let config = RouteConfig::default();
        // Two tight clusters; greedy should clear one before crossing.
        let stops = vec![
            stop("west-1", 0.0, -1.00),
            stop("east-1", 0.0, 1.00),
            stop("west-2", 0.0, -1.01),
            stop("east-2", 0.0, 1.01),
        ];
        // Start next to the west cluster.
        let start = Coordinate::new(0.0, -0.9).unwrap();

        let route = optimize(start, &stops, &config).unwrap();
        assert_eq!(ids(&route), ["west-1", "west-2", "east-1", "east-2"]);
    }

    #[test]
    fn duplicate_coordinates_are_handled_naturally() {
        let config = RouteConfig::default();
        let stops = vec![
            stop("a", 0.0, 1.0),
            stop("b", 0.0, 1.0),
            stop("c", 0.0, 2.0),
        ];

        let route = optimize(origin(), &stops, &config).unwrap();
        assert_eq!(ids(&route), ["a", "b", "c"]);
    }

    #[test]
    fn over_the_cap_still_serves() {
        let config = RouteConfig::new(30, 3.0, 3);
        let stops: Vec<RouteStop> = (0..6)
            .map(|i| stop(&format!("s{i}"), 0.0, f64::from(i) * 0.1 + 0.1))
            .collect();

        let route = optimize(origin(), &stops, &config).unwrap();
        assert_eq!(route.len(), 6);
    }

    #[test]
    fn same_input_gives_same_route() {
        let config = RouteConfig::default();
        let stops = vec![
            stop("a", 0.3, -0.2),
            stop("b", -0.4, 0.6),
            stop("c", 0.9, 0.9),
            stop("d", -0.1, -0.1),
        ];

        let first = optimize(origin(), &stops, &config).unwrap();
        let second = optimize(origin(), &stops, &config).unwrap();
        assert_eq!(first, second);
    }
}
