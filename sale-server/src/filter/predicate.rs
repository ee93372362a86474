//! Predicate compilation.
//!
//! Each set criterion compiles to one boxed predicate over a listing.
//! The conjunction of the returned predicates is the whole filter, so
//! adding a criterion never widens a result set.

use chrono::NaiveDate;

use crate::domain::{Coordinate, Listing};

use super::criteria::FilterCriteria;

/// A compiled check against one listing.
pub type Predicate = Box<dyn Fn(&Listing) -> bool + Send + Sync>;

/// Compile criteria into a predicate list.
///
/// Callers are expected to run [`FilterCriteria::validate`] first. A
/// distance criterion without an origin is rejected by validation, so
/// it is silently skipped here rather than re-checked.
pub fn compile(
    criteria: &FilterCriteria,
    origin: Option<Coordinate>,
    today: NaiveDate,
) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = Vec::new();

    // Completed and cancelled sales never appear in discovery.
    predicates.push(Box::new(|listing: &Listing| listing.is_active()));

    if let Some(needle) = criteria.normalized_search() {
        let needle = needle.to_lowercase();
        predicates.push(Box::new(move |listing: &Listing| {
            text_matches(listing, &needle)
        }));
    }

    match (criteria.date_from, criteria.date_to) {
        (None, None) => {
            // No explicit range: hide sales whose day has passed.
            predicates.push(Box::new(move |listing: &Listing| {
                listing.sale_date >= today
            }));
        }
        (from, to) => {
            predicates.push(Box::new(move |listing: &Listing| {
                from.is_none_or(|f| listing.sale_date >= f)
                    && to.is_none_or(|t| listing.sale_date <= t)
            }));
        }
    }

    if let Some(tags) = criteria.normalized_tags() {
        predicates.push(Box::new(move |listing: &Listing| {
            tags.iter().any(|tag| listing.has_tag(tag))
        }));
    }

    if let Some(cash_only) = criteria.cash_only {
        predicates.push(Box::new(move |listing: &Listing| {
            listing.cash_only == cash_only
        }));
    }

    if let Some(early_birds) = criteria.early_birds {
        predicates.push(Box::new(move |listing: &Listing| {
            listing.early_birds == early_birds
        }));
    }

    if let (Some(max_km), Some(origin)) = (criteria.max_distance_km, origin) {
        predicates.push(Box::new(move |listing: &Listing| {
            origin.distance_km(listing.location) <= max_km
        }));
    }

    predicates
}

/// Apply every predicate; a listing passes only the full conjunction.
pub fn matches_all(listing: &Listing, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p(listing))
}

/// Case-insensitive substring match across title, description, address
/// and tags. `needle` must already be lowercase.
fn text_matches(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
        || listing.description.to_lowercase().contains(needle)
        || listing.address.to_lowercase().contains(needle)
        || listing
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle))
}
