//! The filter engine: validate, compile, apply, order.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::{Coordinate, Listing};

use super::criteria::{FilterCriteria, InvalidFilter};
use super::predicate::{compile, matches_all};

/// Filter `listings` down to those matching `criteria`, ordered for
/// display.
///
/// With an origin the result is ordered nearest first; listings at
/// exactly the same distance keep their input order. Without an origin
/// the result is ordered soonest first by sale date, then by opening
/// time.
///
/// `today` anchors the default date rule: when the criteria carry no
/// explicit date bound, sales from earlier days are excluded. Passing
/// the date in keeps the engine deterministic under test.
pub fn filter_listings(
    listings: &[Listing],
    criteria: &FilterCriteria,
    origin: Option<Coordinate>,
    today: NaiveDate,
) -> Result<Vec<Listing>, InvalidFilter> {
    criteria.validate(origin.is_some())?;
    let predicates = compile(criteria, origin, today);

    let matched = listings.iter().filter(|l| matches_all(l, &predicates));

    match origin {
        Some(origin) => {
            let mut decorated: Vec<(f64, Listing)> = matched
                .map(|l| (origin.distance_km(l.location), l.clone()))
                .collect();
            // Stable sort: equal distances keep their input order.
            decorated.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            Ok(decorated.into_iter().map(|(_, l)| l).collect())
        }
        None => {
            let mut matched: Vec<Listing> = matched.cloned().collect();
            matched.sort_by(|a, b| {
                (a.sale_date, a.hours.start()).cmp(&(b.sale_date, b.hours.start()))
            });
            Ok(matched)
        }
    }
}
